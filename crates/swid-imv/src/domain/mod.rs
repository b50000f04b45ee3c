//! Domain layer: handshake phases, work items and connection state.

pub mod handshake;
pub mod state;
pub mod workitem;

pub use handshake::HandshakePhase;
pub use state::{ConnectionState, SharedConnectionState};
pub use workitem::{WorkItem, WorkItemType};
