//! Bump command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tagwalk_version::BumpLevel;
use tracing::info;

use super::{SchemeArgs, load_config};

/// Level argument for the `auto` strategy.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LevelArg {
    /// Breaking changes
    Major,
    /// New features
    Minor,
    /// Anything else
    Patch,
}

impl From<LevelArg> for BumpLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Major => BumpLevel::Major,
            LevelArg::Minor => BumpLevel::Minor,
            LevelArg::Patch => BumpLevel::Patch,
        }
    }
}

/// Arguments for the bump command.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// Version to bump from
    pub version: String,

    /// Strategy (major, minor, patch, ... or composites like minor+dev) or an
    /// explicit version
    pub strategy: String,

    /// Level the `auto` strategy resolves to
    #[arg(long, value_enum, default_value_t = LevelArg::Patch)]
    pub level: LevelArg,

    #[command(flatten)]
    pub scheme: SchemeArgs,
}

/// Runs the bump command.
pub fn run(args: &BumpArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.scheme.apply(&mut config);

    let versioning = config.changelog.versioning;
    let options = config.bump_options().with_level(args.level.into());
    let bumped = versioning
        .bump(&args.version, &args.strategy, &options)
        .with_context(|| format!("cannot bump {} with '{}'", args.version, args.strategy))?;

    info!(from = %args.version, to = %bumped, %versioning, "bumped version");
    println!("{bumped}");
    Ok(())
}
