//! Versioning schemes and prefix-aware parsed versions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::semantic::{bump_pep440, bump_semver};
use crate::{
    BumpOptions, PEP440_STRATEGIES, Pep440Version, SEMVER_STRATEGIES, Strategy, VersionError,
    VersionResult,
};

/// Version grammar used to recognize tags and compute bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Versioning {
    /// Semantic Versioning 2.0.
    #[default]
    SemVer,
    /// Python's PEP 440.
    Pep440,
}

impl Versioning {
    /// Returns the scheme name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SemVer => "semver",
            Self::Pep440 => "pep440",
        }
    }

    /// Returns the strategy tokens this scheme accepts.
    #[must_use]
    pub fn strategies(self) -> &'static [&'static str] {
        match self {
            Self::SemVer => SEMVER_STRATEGIES,
            Self::Pep440 => PEP440_STRATEGIES,
        }
    }

    /// Returns the base version used when a history has no tags yet.
    #[must_use]
    pub fn initial(self) -> &'static str {
        "0.0.0"
    }

    /// Parses a version, accepting a leading `v`.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersion`] if the text does not parse.
    pub fn parse(self, text: &str) -> VersionResult<ParsedVersion> {
        let (prefix, rest) = split_prefix(text);
        if rest.is_empty() {
            return Err(VersionError::invalid(text, self.name(), "empty version"));
        }

        let value = match self {
            Self::SemVer => VersionValue::SemVer(
                Version::parse(rest)
                    .map_err(|e| VersionError::invalid(text, self.name(), e.to_string()))?,
            ),
            Self::Pep440 => VersionValue::Pep440(
                Pep440Version::parse(rest)
                    .map_err(|_| VersionError::invalid(text, self.name(), "not a PEP 440 version"))?,
            ),
        };

        Ok(ParsedVersion {
            prefix: prefix.to_string(),
            value,
        })
    }

    /// Returns whether the text parses under this scheme.
    #[must_use]
    pub fn is_valid(self, text: &str) -> bool {
        self.parse(text).is_ok()
    }

    /// Computes the next version from `base` and a strategy token.
    ///
    /// A token that is not a strategy but is itself a valid version is
    /// returned verbatim without looking at `base`. The `v` prefix of
    /// `base` is carried over to computed results.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::UnknownStrategy`] for unrecognized tokens,
    /// [`VersionError::InvalidVersion`] if `base` does not parse,
    /// [`VersionError::InvalidTransition`] for illegal state moves and
    /// [`VersionError::Overflow`] when a counter cannot grow any further.
    pub fn bump(self, base: &str, token: &str, options: &BumpOptions) -> VersionResult<String> {
        let Some(strategy) = Strategy::parse(token, self.strategies()) else {
            if self.is_valid(token) {
                return Ok(token.to_string());
            }
            return Err(VersionError::UnknownStrategy {
                strategy: token.to_string(),
                expected: self.strategies().join(", "),
            });
        };

        let version = self.parse(base)?;
        let strategy = strategy.resolve(options.level);

        let bumped = match &version.value {
            VersionValue::SemVer(v) => bump_semver(v, strategy, options)?.to_string(),
            VersionValue::Pep440(v) => bump_pep440(v, strategy, options)?.to_string(),
        };

        Ok(format!("{}{bumped}", version.prefix))
    }
}

impl fmt::Display for Versioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Versioning {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "semver" => Ok(Self::SemVer),
            "pep440" => Ok(Self::Pep440),
            _ => Err(VersionError::UnknownScheme {
                name: s.to_string(),
            }),
        }
    }
}

fn split_prefix(text: &str) -> (&str, &str) {
    match text.strip_prefix('v') {
        Some(rest) => ("v", rest),
        None => ("", text),
    }
}

/// A scheme-specific version value.
///
/// Values from different schemes order SemVer first; a single history only
/// ever holds one scheme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionValue {
    /// A SemVer version.
    SemVer(Version),
    /// A PEP 440 version.
    Pep440(Pep440Version),
}

impl VersionValue {
    /// Returns the major (first release) component.
    #[must_use]
    pub fn major(&self) -> u64 {
        match self {
            Self::SemVer(v) => v.major,
            Self::Pep440(v) => v.major(),
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SemVer(v) => write!(f, "{v}"),
            Self::Pep440(v) => write!(f, "{v}"),
        }
    }
}

/// A version with its optional `v` prefix.
///
/// Equality and ordering ignore the prefix.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    prefix: String,
    value: VersionValue,
}

impl ParsedVersion {
    /// Returns the prefix (`"v"` or empty).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the scheme-specific value.
    #[must_use]
    pub fn value(&self) -> &VersionValue {
        &self.value
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ParsedVersion {}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.value)
    }
}
