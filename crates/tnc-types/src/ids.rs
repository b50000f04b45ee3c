//! Identifier newtypes for connections, verifier modules and vendors.

use serde::{Deserialize, Serialize};

/// Network connection identifier, assigned by the host engine.
///
/// One handshake runs per connection; all callbacks into the verifier carry
/// the connection id so per-connection state can be looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub u32);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one IMV (verifier) module registered with the host.
///
/// Work items carry the id of the module that claimed them; `ImvId::ANY`
/// marks an item nobody has claimed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImvId(pub u32);

impl ImvId {
    /// Wildcard module id. A work item owned by `ANY` is unclaimed.
    pub const ANY: ImvId = ImvId(0xffff);

    /// Whether this id is the unclaimed wildcard.
    pub fn is_any(self) -> bool {
        self == Self::ANY
    }
}

impl std::fmt::Display for ImvId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one IMC (collector) endpoint module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImcId(pub u32);

impl ImcId {
    /// Wildcard collector id, used to address "any collector" on a batch.
    pub const ANY: ImcId = ImcId(0xffff);
}

/// IANA Private Enterprise Number scoping an attribute type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub u32);

impl VendorId {
    /// Trusted Computing Group PEN. All SWID attributes live in this
    /// namespace.
    pub const TCG: VendorId = VendorId(0x005597);
}

/// Vendor-scoped message subtype carried by long-addressed messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageSubtype(pub u32);

impl MessageSubtype {
    /// The SWID message subtype this verifier subscribes to.
    pub const TCG_SWID: MessageSubtype = MessageSubtype(0x03);
}
