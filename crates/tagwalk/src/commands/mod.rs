//! Subcommands.

pub mod bump;
pub mod changelog;
pub mod conventions;
pub mod init;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tagwalk_config::{Config, ConfigError, find_and_load_config};
use tagwalk_version::Versioning;
use tracing::debug;

/// Versioning options shared by commands that bump.
#[derive(Debug, Args)]
pub struct SchemeArgs {
    /// Versioning scheme (semver, pep440)
    #[arg(long)]
    pub versioning: Option<Versioning>,

    /// Bump major on 0.x versions instead of demoting it to minor
    #[arg(long)]
    pub no_zerover: bool,

    /// Drop trailing release components instead of zeroing them (PEP 440)
    #[arg(long)]
    pub trim: bool,
}

impl SchemeArgs {
    /// Overrides the configuration with the given flags.
    pub fn apply(&self, config: &mut Config) {
        if let Some(versioning) = self.versioning {
            config.changelog.versioning = versioning;
        }
        if self.no_zerover {
            config.changelog.zerover = false;
        }
        if self.trim {
            config.changelog.trim = true;
        }
    }
}

/// Loads the given configuration file, or the nearest one, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return tagwalk_config::load_config(path)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound { .. }) => {
            debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
        Err(err) => Err(err).context("failed to load configuration"),
    }
}
