//! Name similarity for orgraft.
//!
//! Scores every source-tree name against every base-tree name once, up
//! front, so the merge engine only ever does lookups. Names are normalized
//! (case, whitespace, punctuation) before scoring; scores are normalized
//! edit-distance ratios in `[0, 100]`.
//!
//! # Key Types
//!
//! - [`SimilarityMatrix`] -- All-pairs scores with row and point lookup
//! - [`normalize`] -- The comparison fold applied to every name
//! - [`ratio`] -- The pairwise similarity score on normalized names

pub mod matrix;
pub mod normalize;

pub use matrix::{ratio, SimilarityMatrix};
pub use normalize::normalize;
