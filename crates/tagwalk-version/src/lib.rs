//! Tagwalk version arithmetic.
//!
//! Parses tags under SemVer or PEP 440, orders them, and computes the next
//! version from a base version and a bump strategy.

mod error;
mod pep440;
mod scheme;
mod semantic;
mod strategy;

pub use error::{VersionError, VersionResult};
pub use pep440::{Pep440Version, PreKind};
pub use scheme::{ParsedVersion, VersionValue, Versioning};
pub use strategy::{
    BumpLevel, BumpOptions, PEP440_STRATEGIES, Primary, SEMVER_STRATEGIES, Strategy,
};
