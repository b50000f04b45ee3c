//! Ports: the inbound API the verifier implements and the outbound SPI it
//! consumes from the host.

pub mod inbound;
pub mod outbound;

pub use inbound::ImvApi;
pub use outbound::{ImvHost, ImvTransport, WorkItemSession, WorkItemStore};
