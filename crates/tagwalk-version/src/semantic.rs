//! Strategy application for both schemes.

use semver::Version;

use crate::error::increment;
use crate::{BumpOptions, Pep440Version, Primary, Strategy, VersionError, VersionResult};

/// Applies a resolved strategy to a SemVer version.
///
/// Every bump drops pre-release and build metadata.
pub(crate) fn bump_semver(
    version: &Version,
    strategy: Strategy,
    options: &BumpOptions,
) -> VersionResult<Version> {
    let bumped = match strategy.primary {
        Primary::Major if version.major == 0 && options.zerover => {
            Version::new(0, increment(version.minor, "minor", version)?, 0)
        }
        Primary::Major => Version::new(increment(version.major, "major", version)?, 0, 0),
        Primary::Minor => Version::new(
            version.major,
            increment(version.minor, "minor", version)?,
            0,
        ),
        Primary::Patch => Version::new(
            version.major,
            version.minor,
            increment(version.patch, "patch", version)?,
        ),
        Primary::Release => Version::new(version.major, version.minor, version.patch),
        other => {
            return Err(VersionError::UnknownStrategy {
                strategy: format!("{other:?}").to_lowercase(),
                expected: crate::SEMVER_STRATEGIES.join(", "),
            });
        }
    };
    Ok(bumped)
}

/// Applies a resolved strategy to a PEP 440 version.
///
/// The primary bump runs first, then the pre-release dent, then the dev dent.
pub(crate) fn bump_pep440(
    version: &Pep440Version,
    strategy: Strategy,
    options: &BumpOptions,
) -> VersionResult<Pep440Version> {
    let trim = options.trim;
    let mut bumped = match strategy.primary {
        Primary::Epoch => version.bump_epoch()?,
        Primary::Release => version.bump_release(None, trim)?,
        Primary::Major if version.major() == 0 && options.zerover => version.bump_minor(trim)?,
        Primary::Major => version.bump_major(trim)?,
        Primary::Minor => version.bump_minor(trim)?,
        Primary::Patch => version.bump_micro(trim)?,
        Primary::Pre => version.bump_pre(None)?,
        Primary::Alpha => version.bump_alpha()?,
        Primary::Beta => version.bump_beta()?,
        Primary::Candidate => version.bump_candidate()?,
        Primary::Post => version.bump_post()?,
        Primary::Dev => version.bump_dev()?,
        Primary::Auto => {
            return Err(VersionError::UnknownStrategy {
                strategy: "auto".to_string(),
                expected: crate::PEP440_STRATEGIES.join(", "),
            });
        }
    };

    if let Some(kind) = strategy.pre {
        bumped = bumped.dent_pre(Some(kind))?;
    }
    if strategy.dev {
        bumped = bumped.dent_dev()?;
    }

    Ok(bumped)
}
