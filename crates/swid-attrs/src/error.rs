//! Error types for the SWID attribute codec.

use thiserror::Error;
use tnc_types::VendorId;

/// Fatal decode conditions.
///
/// Any of these aborts decoding of the remaining input; attributes decoded
/// before the failure point are retained by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended inside an attribute header.
    #[error("truncated attribute header: {have} of 12 bytes")]
    TruncatedHeader { have: usize },

    /// Attribute length field is impossible (shorter than its own header).
    #[error("invalid attribute length {length}")]
    BadLength { length: u32 },

    /// Attribute value extends past the end of the message.
    #[error("truncated value for attribute type {attr_type}: need {need}, have {have}")]
    TruncatedValue {
        attr_type: u32,
        need: usize,
        have: usize,
    },

    /// An attribute flagged mandatory (no-skip) is not understood.
    #[error("unsupported mandatory attribute: vendor {vendor:?}, type {attr_type}")]
    UnsupportedMandatory { vendor: VendorId, attr_type: u32 },

    /// A tag record inside an inventory could not be parsed.
    #[error("malformed tag record at index {index}")]
    MalformedTagRecord { index: usize },
}
