//! Access-control verdicts: action recommendations and compliance
//! evaluation results.
//!
//! The verifier produces a pair (recommendation, evaluation) per
//! connection. When several work items contribute verdicts, the pair is
//! aggregated by keeping the most severe value on each axis, so a single
//! non-compliant item dominates an otherwise compliant handshake.

use serde::{Deserialize, Serialize};

/// Action the host engine is recommended to take for a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ActionRecommendation {
    /// Grant access.
    Allow,
    /// Quarantine the endpoint.
    Isolate,
    /// Deny access.
    NoAccess,
    /// The verifier cannot recommend anything.
    #[default]
    NoRecommendation,
}

impl ActionRecommendation {
    /// Severity rank used for aggregation. Higher means worse for the
    /// endpoint; NoAccess always wins over Allow.
    pub fn severity(self) -> u8 {
        match self {
            ActionRecommendation::Allow => 0,
            ActionRecommendation::Isolate => 1,
            ActionRecommendation::NoAccess => 2,
            ActionRecommendation::NoRecommendation => 0,
        }
    }

    /// The more severe of two recommendations. NoRecommendation is the
    /// neutral element: any concrete recommendation replaces it.
    pub fn worst(self, other: Self) -> Self {
        if self == ActionRecommendation::NoRecommendation {
            return other;
        }
        if other == ActionRecommendation::NoRecommendation {
            return self;
        }
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Compliance judgment supporting an action recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EvaluationResult {
    /// Endpoint satisfies the policy.
    Compliant,
    /// Endpoint violates the policy.
    NonCompliant,
    /// Evaluation failed (malformed data, internal error).
    Error,
    /// No judgment was possible.
    #[default]
    DontKnow,
}

impl EvaluationResult {
    /// Severity rank used for aggregation.
    pub fn severity(self) -> u8 {
        match self {
            EvaluationResult::Compliant => 0,
            EvaluationResult::Error => 1,
            EvaluationResult::NonCompliant => 2,
            EvaluationResult::DontKnow => 0,
        }
    }

    /// The more severe of two evaluations. DontKnow is the neutral
    /// element: any concrete judgment replaces it.
    pub fn worst(self, other: Self) -> Self {
        if self == EvaluationResult::DontKnow {
            return other;
        }
        if other == EvaluationResult::DontKnow {
            return self;
        }
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}
