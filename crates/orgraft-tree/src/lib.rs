//! Arena-backed organization tree for orgraft.
//!
//! This crate provides the tree structure that every other orgraft crate
//! operates on. Nodes live in a flat arena owned by the tree; parents and
//! children refer to each other through [`NodeId`] indices, so reparenting a
//! subtree is an index update, never a deep copy within one tree.
//!
//! # Key Types
//!
//! - [`OrgTree`] -- The arena tree: local names, child lists, per-source
//!   attribute payloads
//! - [`NodeId`] -- Index of a node within its owning tree's arena
//! - [`NameResolver`] / [`PathResolver`] -- Derive a node's canonical full
//!   path name on demand
//! - [`NestedNode`] -- Serde-friendly recursive representation for
//!   import/export

pub mod error;
pub mod nested;
pub mod node;
pub mod resolver;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use nested::NestedNode;
pub use node::NodeId;
pub use resolver::{NameResolver, PathResolver};
pub use tree::OrgTree;
