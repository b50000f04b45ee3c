//! Connection lifecycle notifications delivered by the host engine.

use serde::{Deserialize, Serialize};

/// State-change notification for one connection.
///
/// The verifier interprets only `Create` (allocate per-connection state)
/// and `Delete` (release it); every other transition is forwarded opaquely
/// to the host's generic state-change handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStateChange {
    /// Connection created; handshake about to begin.
    Create,
    /// Handshake in progress.
    Handshake,
    /// Access granted.
    Allowed,
    /// Endpoint quarantined.
    Isolated,
    /// Access denied.
    None,
    /// Connection torn down; state must be released.
    Delete,
}
