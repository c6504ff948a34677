//! The all-pairs similarity matrix.
//!
//! Scoring every (source name, base name) pair is the most expensive step
//! of a merge: O(rows x columns x name length) character work. The build
//! normalizes each name exactly once and then scores whole rows in
//! parallel, instead of re-deriving anything inside a pairwise loop.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::normalize::normalize;

/// Similarity of two already-normalized names, in `[0, 100]`.
///
/// Normalized Levenshtein ratio: 100 means the strings are equal, 0 means
/// every character differs.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// All-pairs similarity scores between a source name set and a base name set.
///
/// Rows are source names, columns are base names, both in the order given
/// to [`build`]. Supports row lookup (all base scores for one source name)
/// and point lookup (one pair), both by the original, un-normalized names.
///
/// [`build`]: SimilarityMatrix::build
#[derive(Clone, Debug)]
pub struct SimilarityMatrix {
    source_names: Vec<String>,
    base_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    row_index: HashMap<String, usize>,
    col_index: HashMap<String, usize>,
}

impl SimilarityMatrix {
    /// Score every source name against every base name.
    ///
    /// Names within each set should be distinct (they are index keys
    /// upstream); a repeated name keeps its last position.
    pub fn build(source_names: &[String], base_names: &[String]) -> Self {
        let source_norm: Vec<String> =
            source_names.iter().map(|name| normalize(name)).collect();
        let base_norm: Vec<String> =
            base_names.iter().map(|name| normalize(name)).collect();

        let rows: Vec<Vec<f64>> = source_norm
            .par_iter()
            .map(|source| base_norm.iter().map(|base| ratio(source, base)).collect())
            .collect();

        let row_index = source_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let col_index = base_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        debug!(
            rows = source_names.len(),
            cols = base_names.len(),
            "computed similarity matrix"
        );

        Self {
            source_names: source_names.to_vec(),
            base_names: base_names.to_vec(),
            rows,
            row_index,
            col_index,
        }
    }

    /// All base scores for one source name, aligned with [`base_names`].
    ///
    /// [`base_names`]: SimilarityMatrix::base_names
    pub fn row(&self, source_name: &str) -> Option<&[f64]> {
        self.row_index
            .get(source_name)
            .map(|&row| self.rows[row].as_slice())
    }

    /// The score for one (source name, base name) pair.
    pub fn score(&self, source_name: &str, base_name: &str) -> Option<f64> {
        let row = *self.row_index.get(source_name)?;
        let col = *self.col_index.get(base_name)?;
        Some(self.rows[row][col])
    }

    /// Column labels, in row order.
    pub fn base_names(&self) -> &[String] {
        &self.base_names
    }

    /// Row labels, in row order.
    pub fn source_names(&self) -> &[String] {
        &self.source_names
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.source_names.len(), self.base_names.len())
    }
}
