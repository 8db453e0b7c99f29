//! Initialize command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use tagwalk_config::{CONFIG_FILE_NAME, Config};
use tagwalk_version::Versioning;
use tracing::info;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Commit convention (basic, angular, conventional)
    #[arg(long, default_value = "basic")]
    pub convention: String,

    /// Versioning scheme (semver, pep440)
    #[arg(long, default_value_t = Versioning::SemVer)]
    pub versioning: Versioning,
}

/// Runs the init command.
pub fn run(args: &InitArgs) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!("{CONFIG_FILE_NAME} already exists, use --force to overwrite");
    }

    let mut config = Config::default();
    config.changelog.convention.clone_from(&args.convention);
    config.changelog.versioning = args.versioning;
    config.validate().context("invalid options")?;
    tagwalk_core::Convention::from_config(&config).context("invalid convention")?;

    let content = toml::to_string_pretty(&config).context("failed to serialize configuration")?;
    fs::write(path, content).with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;

    info!(path = %path.display(), "wrote configuration");
    println!("Created {CONFIG_FILE_NAME}");
    Ok(())
}
