//! Compliance work items.
//!
//! A work item is one pending compliance check, created externally before
//! the handshake begins. The SWID verifier only services items of type
//! `SwidTags`; everything else passes through untouched. The numeric id is
//! the sole correlation key between an outbound inventory request and its
//! inbound response.

use serde::{Deserialize, Serialize};
use tnc_types::{ActionRecommendation, EvaluationResult, ImvId};

/// Kind of compliance check a work item asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItemType {
    /// SWID tag inventory check, serviced by this verifier.
    SwidTags,
    /// Any other registered check type, serviced by a sibling module.
    Other(u32),
}

/// One pending compliance check within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique within the session, assigned by the creator. Doubles as the
    /// request id on the wire.
    pub id: u32,
    /// What the item asks to be verified.
    pub item_type: WorkItemType,
    /// Module that claimed the item; `ImvId::ANY` until claimed.
    pub owner: ImvId,
    /// Argument string; for SWID items it encodes the requested inventory
    /// detail flags.
    pub arg: String,
    /// Human-readable result, set on completion.
    pub result: Option<String>,
    /// Compliance evaluation, set on completion.
    pub evaluation: Option<EvaluationResult>,
    /// Recommendation to apply when evaluation fails.
    pub rec_fail: ActionRecommendation,
    /// Recommendation to apply when no judgment was possible.
    pub rec_noresult: ActionRecommendation,
}

impl WorkItem {
    /// Create an unclaimed work item with neutral failure policies.
    pub fn new(id: u32, item_type: WorkItemType, arg: impl Into<String>) -> Self {
        Self {
            id,
            item_type,
            owner: ImvId::ANY,
            arg: arg.into(),
            result: None,
            evaluation: None,
            rec_fail: ActionRecommendation::NoRecommendation,
            rec_noresult: ActionRecommendation::NoRecommendation,
        }
    }

    /// Recommendation policy for failed evaluations.
    pub fn with_rec_fail(mut self, rec: ActionRecommendation) -> Self {
        self.rec_fail = rec;
        self
    }

    /// Recommendation policy for inconclusive evaluations.
    pub fn with_rec_noresult(mut self, rec: ActionRecommendation) -> Self {
        self.rec_noresult = rec;
        self
    }

    /// Whether no module has claimed this item yet.
    pub fn is_unclaimed(&self) -> bool {
        self.owner.is_any()
    }

    /// Record the completion result and evaluation, returning the action
    /// recommendation the item's policy maps the evaluation to.
    pub fn set_result(
        &mut self,
        result: impl Into<String>,
        eval: EvaluationResult,
    ) -> ActionRecommendation {
        self.result = Some(result.into());
        self.evaluation = Some(eval);
        match eval {
            EvaluationResult::Compliant => ActionRecommendation::Allow,
            EvaluationResult::DontKnow => self.rec_noresult,
            EvaluationResult::Error | EvaluationResult::NonCompliant => self.rec_fail,
        }
    }
}
