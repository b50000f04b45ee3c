//! SWID tag identifiers.

use serde::{Deserialize, Serialize};

/// Identifying metadata for one reported SWID tag.
///
/// Transient: observed and logged per inbound inventory attribute, never
/// persisted by the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagId {
    /// Entity that created the tag (reverse-domain style, e.g.
    /// "strongswan.org").
    pub tag_creator: String,
    /// Software identifier unique within the creator's namespace.
    pub unique_sw_id: String,
}

impl TagId {
    pub fn new(tag_creator: impl Into<String>, unique_sw_id: impl Into<String>) -> Self {
        Self {
            tag_creator: tag_creator.into(),
            unique_sw_id: unique_sw_id.into(),
        }
    }
}

impl std::fmt::Display for TagId {
    /// Renders the conventional `<creator>_<sw-id>.swidtag` file name.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}.swidtag", self.tag_creator, self.unique_sw_id)
    }
}
