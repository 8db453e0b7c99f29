//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Resolve commit logs into releases, changelog models and version bumps.
#[derive(Debug, Parser)]
#[command(name = "tagwalk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: nearest tagwalk.toml)
    #[arg(short, long, global = true, env = "TAGWALK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default tagwalk.toml
    Init(commands::init::InitArgs),

    /// Build the changelog model from a commit log
    Changelog(commands::changelog::ChangelogArgs),

    /// Bump a version with a strategy
    Bump(commands::bump::BumpArgs),

    /// Describe the sections of each convention
    Conventions(commands::conventions::ConventionsArgs),

    /// Print the git log format the changelog command reads
    LogFormat,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Init(args) => commands::init::run(&args),
            Commands::Changelog(args) => commands::changelog::run(&args, config),
            Commands::Bump(args) => commands::bump::run(&args, config),
            Commands::Conventions(args) => commands::conventions::run(&args, config),
            Commands::LogFormat => {
                println!("{}", tagwalk_commit::LOG_FORMAT);
                Ok(())
            }
        }
    }
}
