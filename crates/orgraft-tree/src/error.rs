//! Error types for the tree crate.

use crate::node::NodeId;

/// Errors that can occur during tree operations.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The node id does not resolve to a node in this tree.
    #[error("node not found in tree: {0}")]
    NodeNotFound(NodeId),

    /// The root node cannot be detached or moved.
    #[error("cannot move the root node: {0}")]
    RootMove(NodeId),

    /// Attaching here would make the node an ancestor of itself.
    #[error("cannot attach node {node} under its own descendant {target}")]
    CycleAttach {
        /// The node being moved.
        node: NodeId,
        /// The attachment point inside the node's own subtree.
        target: NodeId,
    },
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
