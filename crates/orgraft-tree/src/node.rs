//! Node identifiers for arena trees.

use std::fmt;

/// Index of a node within its owning [`OrgTree`]'s arena.
///
/// A `NodeId` is only meaningful for the tree that minted it. Ids are never
/// reused within one tree: grafting a subtree away leaves its slots behind,
/// detached from the root but still addressable.
///
/// [`OrgTree`]: crate::tree::OrgTree
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
