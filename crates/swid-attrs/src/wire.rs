//! Big-endian wire codec for vendor-scoped attributes.
//!
//! Framing follows the PA-TNC attribute layout (RFC 5792): a 12-byte
//! header of flags (u8), vendor id (u24) and attribute type (u32) plus a
//! total length (u32), followed by the type-specific value. The `no-skip`
//! header bit marks an attribute the receiver must understand; hitting an
//! unknown no-skip attribute is a fatal condition.
//!
//! Decoding is deliberately salvage-oriented: a fatal condition stops the
//! walk but every attribute decoded before the failure point is kept, so
//! the verifier can still interpret partial input before failing the
//! connection gracefully.

use crate::attr::{
    SwidAttribute, TagIdInventory, TagInventoryRequest, ATTR_TAG_ID_INVENTORY, ATTR_TAG_INVENTORY,
    ATTR_TAG_INVENTORY_REQUEST,
};
use crate::error::CodecError;
use crate::flags::RequestFlags;
use crate::tag::TagId;
use tnc_types::VendorId;

const ATTR_HEADER_LEN: usize = 12;
const FLAG_NOSKIP: u8 = 0x80;

/// Result of decoding one raw message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Attributes decoded, in wire order. On fatal input this holds the
    /// attributes extracted before the failure point.
    pub attributes: Vec<SwidAttribute>,
    /// The condition that aborted decoding, if any.
    pub fatal: Option<CodecError>,
}

impl DecodedMessage {
    /// Whether decoding hit a fatal condition.
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Encodes a sequence of attributes into one message body.
///
/// Wire order equals input order. Known SWID attributes carry the no-skip
/// bit; `Unknown` round-trips as an empty-value attribute without it.
pub fn encode_message(attributes: &[SwidAttribute]) -> Vec<u8> {
    let mut out = Vec::new();
    for attr in attributes {
        let value = encode_value(attr);
        let noskip = !matches!(attr, SwidAttribute::Unknown { .. });
        let flags = if noskip { FLAG_NOSKIP } else { 0 };
        let vendor = attr.vendor().0;
        let length = (ATTR_HEADER_LEN + value.len()) as u32;

        out.push(flags);
        out.extend_from_slice(&vendor.to_be_bytes()[1..]); // u24
        out.extend_from_slice(&attr.attr_type().to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&value);
    }
    out
}

fn encode_value(attr: &SwidAttribute) -> Vec<u8> {
    match attr {
        SwidAttribute::InventoryRequest(req) => {
            let mut v = Vec::with_capacity(9);
            v.push(req.flags.bits());
            v.extend_from_slice(&req.reserved.to_be_bytes());
            v.extend_from_slice(&req.request_id.to_be_bytes());
            v
        }
        SwidAttribute::TagIdInventory(inv) => {
            let mut v = Vec::new();
            v.extend_from_slice(&inv.request_id.to_be_bytes());
            v.extend_from_slice(&(inv.tag_ids.len() as u32).to_be_bytes());
            for tag in &inv.tag_ids {
                put_field(&mut v, tag.tag_creator.as_bytes());
                put_field(&mut v, tag.unique_sw_id.as_bytes());
            }
            v
        }
        SwidAttribute::TagInventory | SwidAttribute::Unknown { .. } => Vec::new(),
    }
}

fn put_field(out: &mut Vec<u8>, field: &[u8]) {
    out.extend_from_slice(&(field.len() as u16).to_be_bytes());
    out.extend_from_slice(field);
}

/// Decodes one raw message body into typed attributes.
pub fn decode_message(mut input: &[u8]) -> DecodedMessage {
    let mut attributes = Vec::new();

    while !input.is_empty() {
        if input.len() < ATTR_HEADER_LEN {
            return fatal(attributes, CodecError::TruncatedHeader { have: input.len() });
        }

        let flags = input[0];
        let vendor = VendorId(u32::from_be_bytes([0, input[1], input[2], input[3]]));
        let attr_type = u32::from_be_bytes([input[4], input[5], input[6], input[7]]);
        let length = u32::from_be_bytes([input[8], input[9], input[10], input[11]]);

        if (length as usize) < ATTR_HEADER_LEN {
            return fatal(attributes, CodecError::BadLength { length });
        }
        let value_len = length as usize - ATTR_HEADER_LEN;
        if input.len() < length as usize {
            return fatal(
                attributes,
                CodecError::TruncatedValue {
                    attr_type,
                    need: value_len,
                    have: input.len() - ATTR_HEADER_LEN,
                },
            );
        }

        let value = &input[ATTR_HEADER_LEN..length as usize];
        input = &input[length as usize..];

        if vendor != VendorId::TCG {
            if flags & FLAG_NOSKIP != 0 {
                return fatal(
                    attributes,
                    CodecError::UnsupportedMandatory { vendor, attr_type },
                );
            }
            attributes.push(SwidAttribute::Unknown { vendor, attr_type });
            continue;
        }

        match attr_type {
            ATTR_TAG_INVENTORY_REQUEST => match decode_request(value) {
                Ok(req) => attributes.push(SwidAttribute::InventoryRequest(req)),
                Err(err) => return fatal(attributes, err),
            },
            ATTR_TAG_ID_INVENTORY => match decode_tag_id_inventory(value) {
                Ok(inv) => attributes.push(SwidAttribute::TagIdInventory(inv)),
                Err(err) => return fatal(attributes, err),
            },
            ATTR_TAG_INVENTORY => attributes.push(SwidAttribute::TagInventory),
            _ => {
                if flags & FLAG_NOSKIP != 0 {
                    return fatal(
                        attributes,
                        CodecError::UnsupportedMandatory { vendor, attr_type },
                    );
                }
                attributes.push(SwidAttribute::Unknown { vendor, attr_type });
            }
        }
    }

    DecodedMessage {
        attributes,
        fatal: None,
    }
}

fn fatal(attributes: Vec<SwidAttribute>, err: CodecError) -> DecodedMessage {
    DecodedMessage {
        attributes,
        fatal: Some(err),
    }
}

fn decode_request(value: &[u8]) -> Result<TagInventoryRequest, CodecError> {
    if value.len() < 9 {
        return Err(CodecError::TruncatedValue {
            attr_type: ATTR_TAG_INVENTORY_REQUEST,
            need: 9,
            have: value.len(),
        });
    }
    Ok(TagInventoryRequest {
        flags: RequestFlags::from_bits(value[0]),
        reserved: u32::from_be_bytes([value[1], value[2], value[3], value[4]]),
        request_id: u32::from_be_bytes([value[5], value[6], value[7], value[8]]),
    })
}

fn decode_tag_id_inventory(value: &[u8]) -> Result<TagIdInventory, CodecError> {
    if value.len() < 8 {
        return Err(CodecError::TruncatedValue {
            attr_type: ATTR_TAG_ID_INVENTORY,
            need: 8,
            have: value.len(),
        });
    }
    let request_id = u32::from_be_bytes([value[0], value[1], value[2], value[3]]);
    let count = u32::from_be_bytes([value[4], value[5], value[6], value[7]]);
    let mut rest = &value[8..];

    let mut tag_ids = Vec::with_capacity(count.min(1024) as usize);
    for index in 0..count as usize {
        let creator = take_field(&mut rest).ok_or(CodecError::MalformedTagRecord { index })?;
        let sw_id = take_field(&mut rest).ok_or(CodecError::MalformedTagRecord { index })?;
        tag_ids.push(TagId {
            tag_creator: String::from_utf8_lossy(creator).into_owned(),
            unique_sw_id: String::from_utf8_lossy(sw_id).into_owned(),
        });
    }
    Ok(TagIdInventory {
        request_id,
        tag_ids,
    })
}

fn take_field<'a>(rest: &mut &'a [u8]) -> Option<&'a [u8]> {
    if rest.len() < 2 {
        return None;
    }
    let len = u16::from_be_bytes([rest[0], rest[1]]) as usize;
    if rest.len() < 2 + len {
        return None;
    }
    let field = &rest[2..2 + len];
    *rest = &rest[2 + len..];
    Some(field)
}
