//! Typed SWID attribute values.

use crate::flags::RequestFlags;
use crate::tag::TagId;
use serde::{Deserialize, Serialize};
use tnc_types::VendorId;

/// TCG-namespace attribute type: SWID tag inventory request.
pub const ATTR_TAG_INVENTORY_REQUEST: u32 = 0x11;
/// TCG-namespace attribute type: SWID tag identifier inventory.
pub const ATTR_TAG_ID_INVENTORY: u32 = 0x12;
/// TCG-namespace attribute type: full SWID tag inventory.
pub const ATTR_TAG_INVENTORY: u32 = 0x14;

/// Outbound request for an endpoint's SWID tag inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInventoryRequest {
    /// Detail level requested.
    pub flags: RequestFlags,
    /// Correlation key; equals the id of the work item this request
    /// services.
    pub request_id: u32,
    /// Reserved on the wire, always sent as zero.
    pub reserved: u32,
}

impl TagInventoryRequest {
    pub fn new(flags: RequestFlags, request_id: u32) -> Self {
        Self {
            flags,
            request_id,
            reserved: 0,
        }
    }
}

/// Inbound inventory of SWID tag identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagIdInventory {
    /// Correlation key copied from the request; zero means an unsolicited
    /// (subscribed) report.
    pub request_id: u32,
    /// Reported tag identifiers, in wire order.
    pub tag_ids: Vec<TagId>,
}

impl TagIdInventory {
    pub fn new(request_id: u32, tag_ids: Vec<TagId>) -> Self {
        Self {
            request_id,
            tag_ids,
        }
    }
}

/// One decoded protocol attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwidAttribute {
    /// Outbound tag inventory request.
    InventoryRequest(TagInventoryRequest),
    /// Inbound tag identifier inventory.
    TagIdInventory(TagIdInventory),
    /// Full tag inventory. Recognized but unconsumed; the structure is a
    /// reserved extension point.
    TagInventory,
    /// Attribute outside the SWID set; skipped by the verifier.
    Unknown { vendor: VendorId, attr_type: u32 },
}

impl SwidAttribute {
    /// Vendor namespace this attribute belongs to.
    pub fn vendor(&self) -> VendorId {
        match self {
            SwidAttribute::Unknown { vendor, .. } => *vendor,
            _ => VendorId::TCG,
        }
    }

    /// Numeric attribute type within its vendor namespace.
    pub fn attr_type(&self) -> u32 {
        match self {
            SwidAttribute::InventoryRequest(_) => ATTR_TAG_INVENTORY_REQUEST,
            SwidAttribute::TagIdInventory(_) => ATTR_TAG_ID_INVENTORY,
            SwidAttribute::TagInventory => ATTR_TAG_INVENTORY,
            SwidAttribute::Unknown { attr_type, .. } => *attr_type,
        }
    }
}
