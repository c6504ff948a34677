//! Nested (recursive) tree representation for import and export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tree node in nested form: the shape catalogs are exchanged in.
///
/// Converts to and from the arena form via [`OrgTree::from_nested`] and
/// [`OrgTree::to_nested`].
///
/// [`OrgTree::from_nested`]: crate::tree::OrgTree::from_nested
/// [`OrgTree::to_nested`]: crate::tree::OrgTree::to_nested
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NestedNode {
    /// The node's local name.
    pub name: String,
    /// Attribute payloads keyed by source label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    /// Child nodes, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NestedNode>,
}

impl NestedNode {
    /// A leaf node with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}
