//! # swid-imv
//!
//! SWID tag inventory verifier for TNC network access control.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Handshake Engine**: Per-connection INIT → WORKITEMS → END state
//!   machine driving tag inventory requests and responses
//! - **Work-Item Correlation**: Claim, correlate and complete pending
//!   compliance checks keyed by request id
//! - **Recommendation Delivery**: Aggregated (recommendation, evaluation)
//!   verdict per connection, worst verdict wins
//! - **Graceful Degradation**: Malformed inbound messages end the
//!   handshake with an error assessment instead of a protocol abort
//!
//! ## Architecture
//!
//! ```text
//! Host engine ──ImvApi callbacks──→ SwidImvService
//!                                        │
//!                                        ├── ImvHost ──→ connection states, recommendations
//!                                        ├── WorkItemSession ──→ pending compliance checks
//!                                        ├── WorkItemStore ──→ finalized results
//!                                        └── ImvTransport ──→ outbound attribute batches
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use swid_imv::{ImvContext, SwidImvService};
//! use swid_imv::ports::inbound::ImvApi;
//! use tnc_types::{ConnectionId, ConnectionStateChange, ImvId};
//!
//! let service = SwidImvService::new(
//!     ImvContext::new("SWID", ImvId(1)),
//!     host,
//!     store,
//!     transport,
//! );
//!
//! service.notify_connection_change(ConnectionId(1), ConnectionStateChange::Create)?;
//! service.batch_ending(ConnectionId(1))?;
//! ```

pub mod domain;
pub mod error;
pub mod msg;
pub mod ports;
pub mod service;

pub use domain::{
    ConnectionState, HandshakePhase, SharedConnectionState, WorkItem, WorkItemType,
};
pub use error::{ImvError, ImvResult};
pub use msg::{Addressing, BatchDisposition, ImvMessage, OutboundBatch, ReceiveOutcome};
pub use ports::inbound::ImvApi;
pub use ports::outbound::{ImvHost, ImvTransport, WorkItemSession, WorkItemStore};
pub use service::{ImvContext, SwidImvService};
