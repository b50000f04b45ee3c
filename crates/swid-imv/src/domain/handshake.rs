//! Handshake phase state machine.
//!
//! One handshake runs per connection. The phase only moves forward:
//!
//! ```text
//! [INIT] ──batch ending──→ [WORKITEMS] ──owned count == 0──→ [END]
//!                               │                              ↑
//!                               └── all items completed ───────┘
//! ```
//!
//! Once END is reached the engine is a no-op for the remainder of the
//! connection.

use serde::{Deserialize, Serialize};

/// Phase of one connection's handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HandshakePhase {
    /// No request issued yet.
    #[default]
    Init,
    /// Requests issued; waiting for inventory responses.
    Workitems,
    /// Terminal assessment sent; engine inactive for this connection.
    End,
}

impl HandshakePhase {
    /// Monotonic ordering rank. Phases never regress.
    fn rank(self) -> u8 {
        match self {
            HandshakePhase::Init => 0,
            HandshakePhase::Workitems => 1,
            HandshakePhase::End => 2,
        }
    }

    /// The later of the current phase and the target. Advancing to an
    /// earlier phase keeps the current one.
    pub fn advanced_to(self, target: HandshakePhase) -> HandshakePhase {
        if target.rank() > self.rank() {
            target
        } else {
            self
        }
    }

    /// Whether the handshake reached its terminal phase.
    pub fn is_end(self) -> bool {
        matches!(self, HandshakePhase::End)
    }
}
