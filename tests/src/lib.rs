//! # SWID-IMV Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Full-handshake choreography
//!     ├── harness.rs    # In-memory host, session, store and transport
//!     └── handshake.rs  # Verifier flows end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p swid-tests
//!
//! # By category
//! cargo test -p swid-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
