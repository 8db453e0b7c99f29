//! Errors raised while loading `tagwalk.toml`.

use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be loaded.
///
/// File errors carry the path involved; validation errors carry the dotted
/// key of the offending value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No file at the given path, or in any ancestor when searching.
    #[error("no tagwalk.toml at {}", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The file exists but cannot be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not TOML, or does not match the schema.
    #[error("{} is not a valid tagwalk.toml: {source}", .path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The TOML decoding error.
        #[source]
        source: toml::de::Error,
    },

    /// A value has the right type but cannot be used.
    #[error("invalid {key}: {reason}")]
    Invalid {
        /// Dotted key, e.g. `changelog.bump`.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
