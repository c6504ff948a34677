//! Merge engine for orgraft.
//!
//! Folds a source tree into a base tree by approximate name matching:
//! candidates come from an all-pairs similarity matrix, near-ties are
//! re-weighted with parent-level evidence, and accepted matches transfer
//! the source node's attribute payload and graft its remaining children
//! into the base tree.
//!
//! # Key Types
//!
//! - [`Merger`] -- Drives one merge of a source tree into a base tree
//! - [`MergeConfig`] -- Accept threshold, candidate limit, parent factor
//! - [`MergeOutcome`] -- Counts of merged / skipped / unmatched nodes
//! - [`Candidate`] -- A base node under consideration, with running score

pub mod candidate;
pub mod config;
pub mod engine;
pub mod error;
pub mod score;

pub use candidate::{select_candidates, Candidate};
pub use config::MergeConfig;
pub use engine::{MergeOutcome, Merger};
pub use error::{MergeError, MergeResult};
pub use score::blend;
