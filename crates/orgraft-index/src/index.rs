//! The name index: one full traversal, one entry per distinct full name.

use std::collections::BTreeMap;

use tracing::debug;

use orgraft_tree::{NameResolver, NodeId, OrgTree};

/// Maps each full name in a tree to the nodes carrying it.
///
/// Built by a single breadth-first traversal, so within one entry the nodes
/// appear in level order. Every node reachable from the root lands in
/// exactly one entry, under its own full name. The map is ordered by name,
/// which makes iteration (and everything downstream of it) deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: BTreeMap<String, Vec<NodeId>>,
}

impl NameIndex {
    /// Index every node of `tree` under the full name the resolver derives
    /// for it, scoped to `label`.
    pub fn build(tree: &OrgTree, resolver: &dyn NameResolver, label: &str) -> Self {
        let mut entries: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
        for node in tree.level_order() {
            let name = resolver.full_name(tree, node, label);
            entries.entry(name).or_default().push(node);
        }
        debug!(names = entries.len(), label, "built name index");
        Self { entries }
    }

    /// The nodes indexed under `name`, in level order.
    pub fn get(&self, name: &str) -> Option<&[NodeId]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// All indexed names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries as (name, nodes) pairs, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.entries
            .iter()
            .map(|(name, nodes)| (name.as_str(), nodes.as_slice()))
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
