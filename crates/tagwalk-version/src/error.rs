//! Version error types.

use thiserror::Error;

/// Version arithmetic errors.
///
/// All of them are permanent: retrying the same bump yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The version string does not parse under the active scheme.
    #[error("invalid {scheme} version '{version}': {reason}")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
        /// The versioning scheme name.
        scheme: &'static str,
        /// Why parsing failed.
        reason: String,
    },

    /// The requested move is illegal from the current version state.
    #[error("invalid transition: {message}")]
    InvalidTransition {
        /// Names the corrective `dent_*` or `bump_*` operation.
        message: String,
    },

    /// The strategy token is neither a known strategy nor a valid version.
    #[error("invalid strategy '{strategy}', use one of {expected}")]
    UnknownStrategy {
        /// The rejected token.
        strategy: String,
        /// Comma-separated list of accepted strategies.
        expected: String,
    },

    /// A counter is already at its largest value.
    #[error("cannot bump {component} of '{version}': counter overflow")]
    Overflow {
        /// The version being bumped.
        version: String,
        /// The counter that would overflow.
        component: &'static str,
    },

    /// The versioning scheme name is not recognized.
    #[error("unknown versioning scheme '{name}', use one of semver, pep440")]
    UnknownScheme {
        /// The rejected scheme name.
        name: String,
    },
}

impl VersionError {
    pub(crate) fn invalid(
        version: impl Into<String>,
        scheme: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            scheme,
            reason: reason.into(),
        }
    }

    pub(crate) fn transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: message.into(),
        }
    }
}

/// Adds one to a version counter, failing instead of wrapping.
pub(crate) fn increment(
    value: u64,
    component: &'static str,
    version: &impl std::fmt::Display,
) -> VersionResult<u64> {
    value.checked_add(1).ok_or_else(|| VersionError::Overflow {
        version: version.to_string(),
        component,
    })
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;
