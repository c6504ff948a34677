//! Full-name index for orgraft.
//!
//! Maps every canonical full name occurring in one tree to the ordered list
//! of nodes that carry it. Duplicate names are expected and preserved: the
//! index is list-valued, never single-valued.
//!
//! # Key Types
//!
//! - [`NameIndex`] -- Full name to node-list mapping for one tree and label

pub mod index;

pub use index::NameIndex;
