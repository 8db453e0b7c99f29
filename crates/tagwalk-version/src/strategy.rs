//! Bump strategies and options.

use std::fmt;

use crate::PreKind;

/// Strategies accepted by the SemVer scheme.
pub const SEMVER_STRATEGIES: &[&str] = &["major", "minor", "patch", "release", "auto"];

/// Strategies accepted by the PEP 440 scheme.
///
/// Every composite is also accepted with `auto` as its primary part.
pub const PEP440_STRATEGIES: &[&str] = &[
    "epoch",
    "release",
    "major",
    "minor",
    "micro",
    "patch",
    "pre",
    "alpha",
    "beta",
    "candidate",
    "post",
    "dev",
    "major+alpha",
    "major+beta",
    "major+candidate",
    "major+dev",
    "major+alpha+dev",
    "major+beta+dev",
    "major+candidate+dev",
    "minor+alpha",
    "minor+beta",
    "minor+candidate",
    "minor+dev",
    "minor+alpha+dev",
    "minor+beta+dev",
    "minor+candidate+dev",
    "micro+alpha",
    "micro+beta",
    "micro+candidate",
    "micro+dev",
    "micro+alpha+dev",
    "micro+beta+dev",
    "micro+candidate+dev",
    "alpha+dev",
    "beta+dev",
    "candidate+dev",
    "auto",
];

/// Level of change implied by a set of commits.
///
/// Ordered `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpLevel {
    /// Bug fixes only.
    #[default]
    Patch,
    /// New features.
    Minor,
    /// Breaking changes.
    Major,
}

impl BumpLevel {
    /// Returns the level implied by a commit's major/minor flags.
    #[must_use]
    pub fn from_flags(is_major: bool, is_minor: bool) -> Self {
        if is_major {
            Self::Major
        } else if is_minor {
            Self::Minor
        } else {
            Self::Patch
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// The primary part of a strategy, before any `+` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primary {
    /// Increment the epoch.
    Epoch,
    /// Promote a pre-release to its release.
    Release,
    /// Increment the major component.
    Major,
    /// Increment the minor component.
    Minor,
    /// Increment the patch (micro) component.
    Patch,
    /// Advance the current pre-release.
    Pre,
    /// Advance to an alpha pre-release.
    Alpha,
    /// Advance to a beta pre-release.
    Beta,
    /// Advance to a release candidate.
    Candidate,
    /// Increment or introduce the post-release counter.
    Post,
    /// Increment the dev-release counter.
    Dev,
    /// Pick major, minor or patch from the commits' signals.
    Auto,
}

impl Primary {
    fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "epoch" => Self::Epoch,
            "release" => Self::Release,
            "major" => Self::Major,
            "minor" => Self::Minor,
            "micro" | "patch" => Self::Patch,
            "pre" => Self::Pre,
            "alpha" => Self::Alpha,
            "beta" => Self::Beta,
            "candidate" => Self::Candidate,
            "post" => Self::Post,
            "dev" => Self::Dev,
            "auto" => Self::Auto,
            _ => return None,
        })
    }
}

/// A decoded strategy token: one primary bump plus optional dents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strategy {
    /// The primary bump.
    pub primary: Primary,
    /// Pre-release kind to dent after the primary bump.
    pub pre: Option<PreKind>,
    /// Whether to dent a dev-release last.
    pub dev: bool,
}

impl Strategy {
    /// Decodes `token` if it is listed in `catalog`.
    ///
    /// `auto+...` composites are accepted whenever the same composite with
    /// `major` as primary is listed.
    #[must_use]
    pub fn parse(token: &str, catalog: &[&str]) -> Option<Self> {
        let listed = catalog.contains(&token)
            || token
                .strip_prefix("auto+")
                .is_some_and(|rest| catalog.contains(&format!("major+{rest}").as_str()));
        if !listed {
            return None;
        }

        let mut parts = token.split('+');
        let primary = Primary::from_word(parts.next()?)?;
        let mut strategy = Self {
            primary,
            pre: None,
            dev: false,
        };

        for part in parts {
            match part {
                "alpha" => strategy.pre = Some(PreKind::Alpha),
                "beta" => strategy.pre = Some(PreKind::Beta),
                "candidate" => strategy.pre = Some(PreKind::Candidate),
                "dev" => strategy.dev = true,
                _ => return None,
            }
        }

        Some(strategy)
    }

    /// Replaces an `auto` primary with the bump matching `level`.
    #[must_use]
    pub fn resolve(self, level: BumpLevel) -> Self {
        if self.primary != Primary::Auto {
            return self;
        }

        let primary = match level {
            BumpLevel::Major => Primary::Major,
            BumpLevel::Minor => Primary::Minor,
            BumpLevel::Patch => Primary::Patch,
        };
        Self { primary, ..self }
    }
}

/// Options shared by both schemes' bump operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpOptions {
    /// Demote `major` to `minor` while the major component is 0.
    pub zerover: bool,
    /// Drop release components after the bumped one instead of zeroing them.
    pub trim: bool,
    /// Level used to resolve `auto`.
    pub level: BumpLevel,
}

impl BumpOptions {
    /// Creates options with `zerover` on, `trim` off and a patch level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zerover: true,
            trim: false,
            level: BumpLevel::Patch,
        }
    }

    /// Sets the zerover policy.
    #[must_use]
    pub fn with_zerover(mut self, zerover: bool) -> Self {
        self.zerover = zerover;
        self
    }

    /// Sets trimming of trailing release components.
    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the level `auto` resolves to.
    #[must_use]
    pub fn with_level(mut self, level: BumpLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for BumpOptions {
    fn default() -> Self {
        Self::new()
    }
}
