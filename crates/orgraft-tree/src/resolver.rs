//! Canonical full-name resolution.
//!
//! Full names are derived on demand, never stored on the node. The resolver
//! is a seam: the merge pipeline compares whatever names the resolver
//! produces, so alternative resolvers (per-source display names, partial
//! paths) change matching behavior without touching the tree.

use crate::node::NodeId;
use crate::tree::OrgTree;

/// Derives a node's canonical full name for one source label.
///
/// Implementations must be deterministic and must apply the same convention
/// to every tree involved in a merge; the rest of the pipeline treats the
/// returned string as opaque.
pub trait NameResolver {
    /// The canonical full name of `node` within `tree`, scoped to `label`.
    ///
    /// `label` identifies the source whose naming convention applies;
    /// resolvers that derive names from per-source attribute payloads use
    /// it, purely structural resolvers may ignore it.
    fn full_name(&self, tree: &OrgTree, node: NodeId, label: &str) -> String;
}

/// The default resolver: local names along the root-to-node path, joined
/// with a fixed separator.
#[derive(Clone, Debug)]
pub struct PathResolver {
    separator: String,
}

impl PathResolver {
    /// A path resolver with a custom separator.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl NameResolver for PathResolver {
    fn full_name(&self, tree: &OrgTree, node: NodeId, _label: &str) -> String {
        let mut names: Vec<&str> = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            match tree.name(id) {
                Some(name) => names.push(name),
                None => break,
            }
            current = tree.parent(id);
        }
        names.reverse();
        names.join(&self.separator)
    }
}
