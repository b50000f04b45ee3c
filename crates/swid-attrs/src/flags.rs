//! SWID request detail-level flags.

use serde::{Deserialize, Serialize};

/// Bitset selecting which inventory detail a request asks for.
///
/// The three bits are independent; any combination is allowed and the empty
/// set is a valid "default inventory" request.
///
/// A flag set is derived from a work-item argument string by the literal
/// presence of its letter code anywhere in the string; every other
/// character is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestFlags(u8);

impl RequestFlags {
    /// Default inventory, no detail bits set.
    pub const NONE: RequestFlags = RequestFlags(0);
    /// Request the full tag including payload.
    pub const R: RequestFlags = RequestFlags(0x20);
    /// Request signature/validation information only.
    pub const S: RequestFlags = RequestFlags(0x40);
    /// Request the concise/summary form.
    pub const C: RequestFlags = RequestFlags(0x80);

    /// Derive a flag set from a work-item argument string.
    pub fn from_arg_str(arg: &str) -> Self {
        let mut flags = Self::NONE;
        if arg.contains('R') {
            flags = flags.union(Self::R);
        }
        if arg.contains('S') {
            flags = flags.union(Self::S);
        }
        if arg.contains('C') {
            flags = flags.union(Self::C);
        }
        flags
    }

    /// Raw wire byte.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Reconstruct from a wire byte, discarding undefined bits.
    pub fn from_bits(bits: u8) -> Self {
        RequestFlags(bits & (Self::R.0 | Self::S.0 | Self::C.0))
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    pub fn union(self, other: Self) -> Self {
        RequestFlags(self.0 | other.0)
    }

    /// Whether no detail bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
