//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces the verifier **requires** the host engine to
//! implement: connection-state registry with recommendation delivery, the
//! shared work-item session, the persistent work-item store, and the
//! message transport.

use crate::domain::{ConnectionState, SharedConnectionState, WorkItem};
use crate::error::ImvResult;
use crate::msg::OutboundBatch;
use tnc_types::{ActionRecommendation, ConnectionId, ConnectionStateChange, EvaluationResult, ImvId};

/// Host engine surface consumed by the verifier.
///
/// The host owns connection states and the delivery of final
/// recommendations; the verifier only looks states up and mutates them.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the host may drive different
/// connections from different threads. The verifier itself never shares
/// mutable state across connections.
pub trait ImvHost: Send + Sync {
    /// Register freshly allocated state for a new connection.
    fn create_state(&self, state: ConnectionState) -> ImvResult<()>;

    /// Deregister and release the state of a closed connection.
    fn delete_state(&self, connection: ConnectionId) -> ImvResult<()>;

    /// Forward a lifecycle transition this verifier does not interpret.
    fn change_state(
        &self,
        connection: ConnectionId,
        change: ConnectionStateChange,
    ) -> ImvResult<()>;

    /// Look up the state registered for a connection.
    fn get_state(&self, connection: ConnectionId) -> Option<SharedConnectionState>;

    /// Deliver the verifier's recommendation for a connection to the host.
    fn provide_recommendation(
        &self,
        connection: ConnectionId,
        rec: ActionRecommendation,
        eval: EvaluationResult,
    ) -> ImvResult<()>;
}

/// Per-session pending work-item collection, shared across all collector
/// modules of the same connection.
///
/// The registry is responsible for its own locking; `complete` performs
/// lookup and removal as one logical step so no interleaving can occur
/// between "found" and "removed".
pub trait WorkItemSession: Send + Sync {
    /// Snapshot of the pending work items, enumeration order unspecified.
    fn workitems(&self) -> Vec<WorkItem>;

    /// Claim an unclaimed item for `owner`. Returns false if the item is
    /// missing or already claimed, so an item can never carry two
    /// outstanding requests.
    fn claim(&self, id: u32, owner: ImvId) -> bool;

    /// Find and remove the pending item with this id in one step.
    fn complete(&self, id: u32) -> Option<WorkItem>;

    /// Number of pending items currently owned by `owner`.
    fn owned_count(&self, owner: ImvId) -> usize;
}

/// Persistent work-item store.
pub trait WorkItemStore: Send + Sync {
    /// Finalize a completed item: persist its result and evaluation.
    fn finalize(&self, item: &WorkItem) -> ImvResult<()>;
}

/// Message transport below the verifier.
///
/// Send failures are surfaced verbatim to the host; the verifier never
/// retries and never rolls back state already mutated before the send.
pub trait ImvTransport: Send + Sync {
    /// Transmit one outbound batch.
    fn send(&self, batch: OutboundBatch) -> ImvResult<()>;
}
