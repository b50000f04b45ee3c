//! # swid-attrs
//!
//! PA-TNC attribute codec for the TCG SWID namespace.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Typed attributes**: [`SwidAttribute`] values the verifier core
//!   consumes and produces, never raw bytes.
//! - **Request flags**: the R/S/C detail-level bitset and its derivation
//!   from a work-item argument string.
//! - **Wire codec**: big-endian encode/decode of vendor-scoped attributes
//!   (RFC 5792 attribute framing) with partial-decode reporting — a fatal
//!   condition still yields every attribute decoded before the failure
//!   point.
//!
//! ## Example
//!
//! ```rust,ignore
//! use swid_attrs::{RequestFlags, SwidAttribute, TagInventoryRequest};
//!
//! let attr = SwidAttribute::InventoryRequest(TagInventoryRequest::new(
//!     RequestFlags::from_arg_str("RS"),
//!     42,
//! ));
//! let bytes = swid_attrs::encode_message(&[attr]);
//! let decoded = swid_attrs::decode_message(&bytes);
//! assert!(!decoded.is_fatal());
//! ```

pub mod attr;
pub mod error;
pub mod flags;
pub mod tag;
pub mod wire;

pub use attr::{SwidAttribute, TagIdInventory, TagInventoryRequest};
pub use error::CodecError;
pub use flags::RequestFlags;
pub use tag::TagId;
pub use wire::{decode_message, encode_message, DecodedMessage};
