//! Error types for the merge crate.

use orgraft_tree::TreeError;

/// Errors that can occur while merging a source tree into a base tree.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The source name has no row in the similarity matrix.
    #[error("source name missing from similarity matrix: {0}")]
    UnknownSourceName(String),

    /// A parent pair could not be scored against the matrix.
    #[error("no similarity score for parent pair: {source_name} vs {base}")]
    MissingScore {
        /// Full name of the source-side parent.
        source_name: String,
        /// Full name of the base-side parent.
        base: String,
    },

    /// A structural tree operation failed.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
