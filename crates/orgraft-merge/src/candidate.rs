//! Candidate selection: the top-ranked base nodes for one source name.

use std::cmp::Ordering;

use orgraft_index::NameIndex;
use orgraft_sim::SimilarityMatrix;
use orgraft_tree::NodeId;

use crate::error::{MergeError, MergeResult};

/// A base node considered as a merge target, with its running score.
///
/// The score starts as the name-level similarity and may be re-weighted
/// with parent evidence before a winner is picked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// The base node.
    pub node: NodeId,
    /// Score in `[0, 100]`.
    pub score: f64,
}

/// Rank base candidates for one source full name.
///
/// Base names are sorted by score descending, ties broken by name
/// descending, and the top `limit` names are expanded through the index.
/// A duplicated full name contributes every node it indexes, each
/// inheriting the name's score. The order of the returned list is the rank
/// order; downstream tie-breaking keeps the earliest candidate, so callers
/// must not reorder it.
pub fn select_candidates(
    source_name: &str,
    matrix: &SimilarityMatrix,
    base_index: &NameIndex,
    limit: usize,
) -> MergeResult<Vec<Candidate>> {
    let row = matrix
        .row(source_name)
        .ok_or_else(|| MergeError::UnknownSourceName(source_name.to_string()))?;

    let mut ranked: Vec<(&str, f64)> = matrix
        .base_names()
        .iter()
        .map(String::as_str)
        .zip(row.iter().copied())
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.0.cmp(a.0))
    });
    ranked.truncate(limit);

    let mut candidates = Vec::new();
    for (name, score) in ranked {
        if let Some(nodes) = base_index.get(name) {
            for node in nodes {
                candidates.push(Candidate { node: *node, score });
            }
        }
    }
    Ok(candidates)
}
