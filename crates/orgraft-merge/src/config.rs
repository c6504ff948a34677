//! Merge configuration.

use serde::{Deserialize, Serialize};

/// Tunable knobs for one merge pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Minimum score (exclusive) required to commit a merge.
    ///
    /// A candidate scoring exactly the threshold is skipped.
    pub accept_threshold: f64,
    /// How many top-ranked base names are expanded into candidates per
    /// source node.
    pub candidate_limit: usize,
    /// Weight of parent-level evidence during disambiguation.
    ///
    /// A candidate's score becomes `(own + parent * factor) / (1 + factor)`;
    /// the default gives parent evidence one third of the blend.
    pub parent_factor: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 95.0,
            candidate_limit: 5,
            parent_factor: 0.5,
        }
    }
}
