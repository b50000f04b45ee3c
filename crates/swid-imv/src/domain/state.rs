//! Per-connection verifier state.

use crate::domain::handshake::HandshakePhase;
use crate::ports::outbound::WorkItemSession;
use parking_lot::RwLock;
use std::sync::Arc;
use tnc_types::{ActionRecommendation, ConnectionId, EvaluationResult};

/// Connection state shared between the host registry and the engine.
pub type SharedConnectionState = Arc<RwLock<ConnectionState>>;

/// State of one connection's handshake.
///
/// Created on the Create lifecycle notification, destroyed on Delete,
/// owned by the host's connection registry and mutated only by the
/// handshake engine.
pub struct ConnectionState {
    connection: ConnectionId,
    phase: HandshakePhase,
    session: Option<Arc<dyn WorkItemSession>>,
    rec: ActionRecommendation,
    eval: EvaluationResult,
}

impl ConnectionState {
    /// Fresh state at phase INIT with no verdict yet.
    pub fn new(connection: ConnectionId) -> Self {
        Self {
            connection,
            phase: HandshakePhase::Init,
            session: None,
            rec: ActionRecommendation::default(),
            eval: EvaluationResult::default(),
        }
    }

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// Advance the handshake phase; regressions are ignored.
    pub fn advance_phase(&mut self, target: HandshakePhase) {
        self.phase = self.phase.advanced_to(target);
    }

    /// Session holding this connection's pending work items, if any.
    pub fn session(&self) -> Option<Arc<dyn WorkItemSession>> {
        self.session.clone()
    }

    /// Attach the session. Done by the host when the endpoint is known.
    pub fn set_session(&mut self, session: Arc<dyn WorkItemSession>) {
        self.session = Some(session);
    }

    /// Overwrite the connection verdict.
    pub fn set_recommendation(&mut self, rec: ActionRecommendation, eval: EvaluationResult) {
        self.rec = rec;
        self.eval = eval;
    }

    /// Merge a work-item verdict into the connection verdict, keeping the
    /// more severe value on each axis.
    pub fn update_recommendation(&mut self, rec: ActionRecommendation, eval: EvaluationResult) {
        self.rec = self.rec.worst(rec);
        self.eval = self.eval.worst(eval);
    }

    /// Current (recommendation, evaluation) pair.
    pub fn recommendation(&self) -> (ActionRecommendation, EvaluationResult) {
        (self.rec, self.eval)
    }

    /// Wrap into the shared handle the host registry hands out.
    pub fn into_shared(self) -> SharedConnectionState {
        Arc::new(RwLock::new(self))
    }
}
