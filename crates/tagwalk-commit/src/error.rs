//! Commit error types.

use thiserror::Error;

/// Errors raised while building commit records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// A timestamp field is not a POSIX timestamp.
    #[error("invalid {field} '{value}': expected a POSIX timestamp")]
    InvalidDate {
        /// Which date field failed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A log block ended before all fixed fields or the marker were read.
    #[error("truncated log block for commit '{hash}': missing {missing}")]
    TruncatedBlock {
        /// Hash of the block, if it got that far.
        hash: String,
        /// The first missing field.
        missing: &'static str,
    },
}

/// Result type for commit operations.
pub type CommitResult<T> = Result<T, CommitError>;
