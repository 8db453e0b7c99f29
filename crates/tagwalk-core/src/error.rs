//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Version error.
    #[error("version error: {0}")]
    Version(#[from] tagwalk_version::VersionError),

    /// Commit log error.
    #[error("commit error: {0}")]
    Commit(#[from] tagwalk_commit::CommitError),

    /// Plugin error.
    #[error("plugin error: {0}")]
    Plugin(#[from] tagwalk_plugin::PluginError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] tagwalk_config::ConfigError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
