//! Core library for Tagwalk.
//!
//! Resolves a commit log into releases and assembles the changelog model
//! that renderers consume.

mod changelog;
mod convention;
mod error;
mod release;
mod resolver;

pub use changelog::{Changelog, ChangelogBuilder};
pub use convention::Convention;
pub use error::{CoreError, CoreResult};
pub use release::{Release, Section};
pub use resolver::{Resolver, UNRELEASED_VERSION};
