//! Cross-crate choreography: the verifier service driven through its host
//! callback surface against in-memory implementations of every outbound
//! port.

pub mod harness;
mod handshake;
