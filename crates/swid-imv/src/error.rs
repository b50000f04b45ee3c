//! Error types for the SWID verifier subsystem.

use thiserror::Error;
use tnc_types::ConnectionId;

/// SWID verifier errors.
///
/// Nothing here aborts the process; the worst outcome is a single
/// connection assessed as unknown or error.
#[derive(Debug, Error)]
pub enum ImvError {
    /// No per-connection state registered for this connection id.
    #[error("no state found for connection {connection}")]
    StateNotFound { connection: ConnectionId },

    /// The transport refused an outbound batch. Propagated verbatim to the
    /// host; never retried here.
    #[error("transport send failed: {reason}")]
    Transport { reason: String },

    /// The inbound message could not be received at all (no payload to
    /// interpret).
    #[error("message receive failed: {reason}")]
    ReceiveFailed { reason: String },

    /// The work-item store rejected a finalization.
    #[error("work-item store error: {reason}")]
    Store { reason: String },
}

/// Result type for verifier operations.
pub type ImvResult<T> = Result<T, ImvError>;
