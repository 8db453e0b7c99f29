//! PEP 440 versions and their state transitions.
//!
//! A PEP 440 version is made of an epoch, a release tuple and optional
//! pre-release, post-release, dev-release and local segments. The bump and
//! dent operations below move between those states; a *bump* advances an
//! existing qualifier, a *dent* introduces one that is absent.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::increment;
use crate::{VersionError, VersionResult};

const SCHEME: &str = "pep440";

static PEP440_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:(?:-(?P<post_n1>[0-9]+))|(?:[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?))?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        $",
    )
    .expect("invalid regex")
});

/// Kind of a pre-release qualifier, ordered alpha < beta < candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreKind {
    /// `a` / `alpha`.
    Alpha,
    /// `b` / `beta`.
    Beta,
    /// `rc` / `c` / `pre` / `preview`.
    Candidate,
}

impl PreKind {
    /// Returns the long name used in strategies and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Candidate => "candidate",
        }
    }

    /// Returns the normalized spelling used in version strings.
    #[must_use]
    pub fn short(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Candidate => "rc",
        }
    }

    fn from_spelling(spelling: &str) -> Self {
        match spelling.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Self::Alpha,
            "b" | "beta" => Self::Beta,
            _ => Self::Candidate,
        }
    }
}

/// A parsed PEP 440 version.
///
/// Equality and ordering follow PEP 440 semantics, so `1.0` equals `1`.
#[derive(Debug, Clone)]
pub struct Pep440Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreKind, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<String>,
}

impl Pep440Version {
    /// Parses a PEP 440 version (without any `v` prefix).
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersion`] if the string is not PEP 440.
    pub fn parse(text: &str) -> VersionResult<Self> {
        let captures = PEP440_RE
            .captures(text)
            .ok_or_else(|| VersionError::invalid(text, SCHEME, "not a PEP 440 version"))?;

        let epoch = number(text, &captures, "epoch")?.unwrap_or(0);
        let release = captures
            .name("release")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .map(|part| parse_number(text, part))
            .collect::<VersionResult<Vec<_>>>()?;

        let pre = match captures.name("pre_l") {
            Some(label) => Some((
                PreKind::from_spelling(label.as_str()),
                number(text, &captures, "pre_n")?.unwrap_or(0),
            )),
            None => None,
        };

        let post = if captures.name("post_n1").is_some() {
            number(text, &captures, "post_n1")?
        } else if captures.name("post_l").is_some() {
            Some(number(text, &captures, "post_n2")?.unwrap_or(0))
        } else {
            None
        };

        let dev = if captures.name("dev_l").is_some() {
            Some(number(text, &captures, "dev_n")?.unwrap_or(0))
        } else {
            None
        };

        let local = captures
            .name("local")
            .map(|m| m.as_str().to_ascii_lowercase().replace(['-', '_'], "."));

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    fn from_parts(
        epoch: u64,
        release: Vec<u64>,
        pre: Option<(PreKind, u64)>,
        post: Option<u64>,
        dev: Option<u64>,
    ) -> Self {
        Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local: None,
        }
    }

    /// Returns the epoch (0 when absent).
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns the release tuple.
    #[must_use]
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Returns the first release component.
    #[must_use]
    pub fn major(&self) -> u64 {
        self.release.first().copied().unwrap_or(0)
    }

    /// Returns the pre-release qualifier.
    #[must_use]
    pub fn pre(&self) -> Option<(PreKind, u64)> {
        self.pre
    }

    /// Returns the post-release number.
    #[must_use]
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    /// Returns the dev-release number.
    #[must_use]
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// Returns the normalized local segment.
    #[must_use]
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Increments the epoch and keeps the release tuple, clearing everything else.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] when the epoch is at `u64::MAX`.
    pub fn bump_epoch(&self) -> VersionResult<Self> {
        let epoch = increment(self.epoch, "epoch", self)?;
        Ok(Self::from_parts(epoch, self.release.clone(), None, None, None))
    }

    /// Bumps the release component at `level` (0 = major, 1 = minor, 2 = micro).
    ///
    /// Later components are zeroed, or dropped when `trim` is set. Short tuples
    /// are extended with zeros first. With no level the release tuple is kept
    /// as is (optionally trimmed of trailing zeros), which promotes a pre-,
    /// post- or dev-release to the plain release. Pre, post and dev qualifiers
    /// are always cleared.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] when the bumped component is at `u64::MAX`.
    pub fn bump_release(&self, level: Option<usize>, trim: bool) -> VersionResult<Self> {
        let mut release = self.release.clone();

        match level {
            None => {
                if trim {
                    while release.len() > 1 && release.last() == Some(&0) {
                        release.pop();
                    }
                }
            }
            Some(level) => {
                if level < release.len() {
                    release[level] = increment(release[level], "release", self)?;
                } else {
                    release.resize(level, 0);
                    release.push(1);
                }
                if trim {
                    release.truncate(level + 1);
                } else {
                    for component in &mut release[level + 1..] {
                        *component = 0;
                    }
                }
            }
        }

        Ok(Self::from_parts(self.epoch, release, None, None, None))
    }

    /// Bumps the major release component.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_release`].
    pub fn bump_major(&self, trim: bool) -> VersionResult<Self> {
        self.bump_release(Some(0), trim)
    }

    /// Bumps the minor release component.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_release`].
    pub fn bump_minor(&self, trim: bool) -> VersionResult<Self> {
        self.bump_release(Some(1), trim)
    }

    /// Bumps the micro release component.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_release`].
    pub fn bump_micro(&self, trim: bool) -> VersionResult<Self> {
        self.bump_release(Some(2), trim)
    }

    /// Bumps the pre-release qualifier.
    ///
    /// Only legal on a pre-release. With `kind` equal to the current kind (or
    /// `None`) the number is incremented; a strictly later kind restarts at 0.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidTransition`] when there is no pre-release
    /// qualifier or when `kind` is earlier than the current one, and
    /// [`VersionError::Overflow`] when the number is at `u64::MAX`.
    pub fn bump_pre(&self, kind: Option<PreKind>) -> VersionResult<Self> {
        let Some((current, number)) = self.pre else {
            return Err(match kind {
                Some(kind) => VersionError::transition(format!(
                    "cannot bump from release to {} pre-release (use `dent_{}`)",
                    kind.label(),
                    kind.label()
                )),
                None => VersionError::transition(
                    "cannot bump from release to pre-release (use `dent_pre`)",
                ),
            });
        };

        let target = kind.unwrap_or(current);
        let number = match target.cmp(&current) {
            Ordering::Equal => increment(number, "pre-release", self)?,
            Ordering::Greater => 0,
            Ordering::Less => {
                return Err(VersionError::transition(format!(
                    "cannot bump from {} to {} pre-release (use `dent_{}`)",
                    current.label(),
                    target.label(),
                    target.label()
                )));
            }
        };

        Ok(Self::from_parts(
            self.epoch,
            self.release.clone(),
            Some((target, number)),
            None,
            None,
        ))
    }

    /// Bumps to the next alpha pre-release.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_pre`].
    pub fn bump_alpha(&self) -> VersionResult<Self> {
        self.bump_pre(Some(PreKind::Alpha))
    }

    /// Bumps to the next beta pre-release.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_pre`].
    pub fn bump_beta(&self) -> VersionResult<Self> {
        self.bump_pre(Some(PreKind::Beta))
    }

    /// Bumps to the next release candidate.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::bump_pre`].
    pub fn bump_candidate(&self) -> VersionResult<Self> {
        self.bump_pre(Some(PreKind::Candidate))
    }

    /// Increments or introduces the post-release counter, keeping any pre-release.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Overflow`] when the counter is at `u64::MAX`.
    pub fn bump_post(&self) -> VersionResult<Self> {
        let post = match self.post {
            Some(post) => increment(post, "post-release", self)?,
            None => 0,
        };
        Ok(Self::from_parts(
            self.epoch,
            self.release.clone(),
            self.pre,
            Some(post),
            None,
        ))
    }

    /// Increments the dev-release counter.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidTransition`] when there is no dev qualifier
    /// and [`VersionError::Overflow`] when the counter is at `u64::MAX`.
    pub fn bump_dev(&self) -> VersionResult<Self> {
        let Some(dev) = self.dev else {
            let from = if self.post.is_some() {
                "post"
            } else if let Some((kind, _)) = self.pre {
                kind.label()
            } else {
                "release"
            };
            return Err(VersionError::transition(format!(
                "cannot bump from {from} to dev-release (use `dent_dev`)"
            )));
        };

        Ok(Self::from_parts(
            self.epoch,
            self.release.clone(),
            self.pre,
            self.post,
            Some(increment(dev, "dev-release", self)?),
        ))
    }

    /// Introduces a pre-release qualifier at number 0 (alpha by default).
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidTransition`] if a pre-release qualifier
    /// already exists.
    pub fn dent_pre(&self, kind: Option<PreKind>) -> VersionResult<Self> {
        if let Some((current, _)) = self.pre {
            return Err(VersionError::transition(format!(
                "cannot dent {} pre-releases (use `bump_{}`)",
                current.label(),
                current.label()
            )));
        }

        let kind = kind.unwrap_or(PreKind::Alpha);
        Ok(Self::from_parts(
            self.epoch,
            self.release.clone(),
            Some((kind, 0)),
            None,
            None,
        ))
    }

    /// Dents to the first alpha pre-release.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::dent_pre`].
    pub fn dent_alpha(&self) -> VersionResult<Self> {
        self.dent_pre(Some(PreKind::Alpha))
    }

    /// Dents to the first beta pre-release.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::dent_pre`].
    pub fn dent_beta(&self) -> VersionResult<Self> {
        self.dent_pre(Some(PreKind::Beta))
    }

    /// Dents to the first release candidate.
    ///
    /// # Errors
    ///
    /// See [`Pep440Version::dent_pre`].
    pub fn dent_candidate(&self) -> VersionResult<Self> {
        self.dent_pre(Some(PreKind::Candidate))
    }

    /// Introduces a dev-release qualifier at number 0.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidTransition`] if a dev qualifier exists.
    pub fn dent_dev(&self) -> VersionResult<Self> {
        if self.dev.is_some() {
            return Err(VersionError::transition(
                "cannot dent dev-releases (use `bump_dev`)",
            ));
        }

        Ok(Self::from_parts(
            self.epoch,
            self.release.clone(),
            self.pre,
            self.post,
            Some(0),
        ))
    }

    fn sort_key(&self) -> SortKey<'_> {
        let end = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |index| index + 1);

        let pre = match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => Bound::Below,
            (None, _, _) => Bound::Above,
            (Some(pre), _, _) => Bound::At(pre),
        };

        SortKey {
            epoch: self.epoch,
            release: &self.release[..end],
            pre,
            post: self.post.map_or(Bound::Below, Bound::At),
            dev: self.dev.map_or(Bound::Above, Bound::At),
            local: self
                .local
                .as_deref()
                .map_or(Bound::Below, |local| Bound::At(local_segments(local))),
        }
    }
}

/// Sentinel-aware slot used to order optional segments.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Bound<T> {
    Below,
    At(T),
    Above,
}

/// Local segments: numbers sort after text.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LocalSegment {
    Text(String),
    Number(u64),
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey<'a> {
    epoch: u64,
    release: &'a [u64],
    pre: Bound<(PreKind, u64)>,
    post: Bound<u64>,
    dev: Bound<u64>,
    local: Bound<Vec<LocalSegment>>,
}

fn local_segments(local: &str) -> Vec<LocalSegment> {
    local
        .split('.')
        .map(|segment| {
            segment
                .parse()
                .map_or_else(|_| LocalSegment::Text(segment.to_string()), LocalSegment::Number)
        })
        .collect()
}

fn parse_number(text: &str, digits: &str) -> VersionResult<u64> {
    digits
        .parse()
        .map_err(|e| VersionError::invalid(text, SCHEME, format!("{digits}: {e}")))
}

fn number(text: &str, captures: &Captures<'_>, name: &str) -> VersionResult<Option<u64>> {
    captures
        .name(name)
        .map(|m| parse_number(text, m.as_str()))
        .transpose()
}

impl PartialEq for Pep440Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pep440Version {}

impl PartialOrd for Pep440Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pep440Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl FromStr for Pep440Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pep440Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }

        let mut components = self.release.iter();
        if let Some(first) = components.next() {
            write!(f, "{first}")?;
        }
        for component in components {
            write!(f, ".{component}")?;
        }

        if let Some((kind, number)) = self.pre {
            write!(f, "{}{number}", kind.short())?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{local}")?;
        }

        Ok(())
    }
}
