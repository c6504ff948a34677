//! The arena tree: node storage, traversal, and structural mutation.
//!
//! [`OrgTree`] owns all of its nodes in a flat arena indexed by [`NodeId`].
//! Child lists express exclusive ownership: moving a node always detaches it
//! from its old parent's child list before attaching it to the new one, so
//! parent back-references stay consistent at every step.
//!
//! # Invariants
//!
//! - Exactly one node (the root) has no parent while attached.
//! - A node id appears in at most one child list.
//! - Grafting a subtree away leaves its arena slots behind, detached from
//!   the root but still addressable by id.

use std::collections::{BTreeMap, VecDeque};

use serde_json::Value;
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::nested::NestedNode;
use crate::node::NodeId;

/// A rooted, ordered hierarchy of named nodes with per-source attributes.
#[derive(Clone, Debug)]
pub struct OrgTree {
    nodes: Vec<NodeSlot>,
    root: NodeId,
}

#[derive(Clone, Debug)]
struct NodeSlot {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, Value>,
}

impl OrgTree {
    /// Create a tree containing only a root node with the given local name.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc(root_name.into(), None, BTreeMap::new());
        tree
    }

    /// The root node's id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns `true` if the id resolves to a slot in this tree's arena.
    ///
    /// Detached slots (left behind by [`adopt_subtree`]) still resolve.
    ///
    /// [`adopt_subtree`]: OrgTree::adopt_subtree
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Returns `true` if the id is this tree's root.
    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// The node's local name.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|slot| slot.name.as_str())
    }

    /// The node's parent, or `None` for the root and for unknown ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|slot| slot.parent)
    }

    /// The node's children, in order.
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(id.0).map(|slot| slot.children.as_slice())
    }

    /// Number of nodes reachable from the root.
    ///
    /// Walks the tree, so this is O(size); detached slots are not counted.
    pub fn node_count(&self) -> usize {
        self.level_order().len()
    }

    // ---------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------

    /// Set the attribute payload carried by `id` for one source label.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        label: impl Into<String>,
        value: Value,
    ) -> TreeResult<()> {
        let slot = self
            .nodes
            .get_mut(id.0)
            .ok_or(TreeError::NodeNotFound(id))?;
        slot.attrs.insert(label.into(), value);
        Ok(())
    }

    /// The attribute payload carried by `id` for one source label.
    pub fn attr(&self, id: NodeId, label: &str) -> Option<&Value> {
        self.nodes.get(id.0).and_then(|slot| slot.attrs.get(label))
    }

    /// All attribute payloads carried by `id`, keyed by source label.
    pub fn attrs(&self, id: NodeId) -> Option<&BTreeMap<String, Value>> {
        self.nodes.get(id.0).map(|slot| &slot.attrs)
    }

    // ---------------------------------------------------------------
    // Growth
    // ---------------------------------------------------------------

    /// Append a new child with the given local name under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> TreeResult<NodeId> {
        if !self.contains(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        let id = self.alloc(name.into(), Some(parent), BTreeMap::new());
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    // ---------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------

    /// All nodes reachable from the root in breadth-first (level) order.
    ///
    /// The root comes first; within one level, siblings keep their child-list
    /// order. This is the canonical enumeration order for indexing and for
    /// the merge engine's reversed processing order.
    pub fn level_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::new();
        queue.push_back(self.root);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for child in &self.nodes[id.0].children {
                queue.push_back(*child);
            }
        }

        order
    }

    // ---------------------------------------------------------------
    // Structural mutation
    // ---------------------------------------------------------------

    /// Move a node (and its whole subtree) under a new parent in this tree.
    ///
    /// Detaches from the old parent's child list and appends to the new
    /// parent's, in one step. The root cannot be moved, and a node cannot be
    /// attached inside its own subtree.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> TreeResult<()> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        if !self.contains(new_parent) {
            return Err(TreeError::NodeNotFound(new_parent));
        }
        if self.is_root(node) {
            return Err(TreeError::RootMove(node));
        }
        if node == new_parent || self.is_in_subtree(new_parent, node) {
            return Err(TreeError::CycleAttach {
                node,
                target: new_parent,
            });
        }

        self.detach(node);
        self.nodes[node.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(node);
        debug!(node = %node, parent = %new_parent, "reparented node");
        Ok(())
    }

    /// Move the subtree rooted at `node` out of `donor` and attach it as the
    /// last child of `under` in this tree.
    ///
    /// Node data (names, attributes, child order) is carried over into fresh
    /// slots of this arena; the donor keeps empty, detached slots behind so
    /// its other ids stay valid. Returns the id of the subtree root in this
    /// tree. The donor's root cannot be adopted.
    pub fn adopt_subtree(
        &mut self,
        donor: &mut OrgTree,
        node: NodeId,
        under: NodeId,
    ) -> TreeResult<NodeId> {
        if !self.contains(under) {
            return Err(TreeError::NodeNotFound(under));
        }
        if !donor.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        if donor.is_root(node) {
            return Err(TreeError::RootMove(node));
        }

        donor.detach(node);

        let name = donor.nodes[node.0].name.clone();
        let attrs = std::mem::take(&mut donor.nodes[node.0].attrs);
        let new_root = self.alloc(name, Some(under), attrs);
        self.nodes[under.0].children.push(new_root);

        // Breadth-first copy keeps sibling order intact.
        let mut queue = VecDeque::new();
        queue.push_back((node, new_root));
        while let Some((old_id, new_id)) = queue.pop_front() {
            let old_children = std::mem::take(&mut donor.nodes[old_id.0].children);
            for old_child in old_children {
                let name = donor.nodes[old_child.0].name.clone();
                let attrs = std::mem::take(&mut donor.nodes[old_child.0].attrs);
                donor.nodes[old_child.0].parent = None;
                let new_child = self.alloc(name, Some(new_id), attrs);
                self.nodes[new_id.0].children.push(new_child);
                queue.push_back((old_child, new_child));
            }
        }

        debug!(node = %node, target = %new_root, "adopted subtree");
        Ok(new_root)
    }

    // ---------------------------------------------------------------
    // Nested conversion
    // ---------------------------------------------------------------

    /// Build a tree from its nested representation.
    pub fn from_nested(nested: NestedNode) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc_nested(nested, None);
        tree
    }

    /// The nested representation of everything reachable from the root.
    pub fn to_nested(&self) -> NestedNode {
        self.collect_nested(self.root)
    }

    fn alloc_nested(&mut self, nested: NestedNode, parent: Option<NodeId>) -> NodeId {
        let NestedNode {
            name,
            attributes,
            children,
        } = nested;
        let id = self.alloc(name, parent, attributes);
        for child in children {
            let child_id = self.alloc_nested(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn collect_nested(&self, id: NodeId) -> NestedNode {
        let slot = &self.nodes[id.0];
        NestedNode {
            name: slot.name.clone(),
            attributes: slot.attrs.clone(),
            children: slot
                .children
                .iter()
                .map(|child| self.collect_nested(*child))
                .collect(),
        }
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn alloc(
        &mut self,
        name: String,
        parent: Option<NodeId>,
        attrs: BTreeMap<String, Value>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot {
            name,
            parent,
            children: Vec::new(),
            attrs,
        });
        id
    }

    /// Remove `id` from its parent's child list and clear its back-reference.
    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Returns `true` if `id` lies in the subtree rooted at `ancestor`.
    fn is_in_subtree(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }
}
