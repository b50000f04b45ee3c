//! # TNC Types Crate
//!
//! This crate contains the TNC (Trusted Network Connect) vocabulary shared
//! across the verifier crates: connection and module identifiers, the
//! recommendation/evaluation verdict types, and the connection lifecycle
//! notifications delivered by the host engine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate TNC types are defined here.
//! - **Host-Agnostic**: Nothing in this crate assumes a particular host
//!   engine; the types mirror the IF-IMV vocabulary (RFC 5793 / TCG TNC).

pub mod ids;
pub mod lifecycle;
pub mod recommendation;

pub use ids::*;
pub use lifecycle::ConnectionStateChange;
pub use recommendation::*;
