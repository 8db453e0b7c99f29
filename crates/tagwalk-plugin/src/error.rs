//! Plugin error types.

use thiserror::Error;

/// Plugin-related errors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A requested changelog section is not in the type table.
    #[error("unknown section '{name}', use one of {expected}")]
    UnknownSection {
        /// The rejected section name.
        name: String,
        /// Comma-separated list of known type keys.
        expected: String,
    },

    /// No convention is registered under that name.
    #[error("unknown convention '{0}', use one of basic, angular, conventional")]
    UnknownConvention(String),

    /// A type table produced an unusable pattern.
    #[error("invalid type pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
