//! Conventions command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tagwalk_core::Convention;
use tagwalk_plugin::CommitConvention;

use super::load_config;

/// Arguments for the conventions command.
#[derive(Debug, Args)]
pub struct ConventionsArgs {
    /// Convention to describe (default: every built-in one)
    pub name: Option<String>,
}

/// Runs the conventions command.
pub fn run(args: &ConventionsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let names: Vec<&str> = match &args.name {
        Some(name) => vec![name.as_str()],
        None => Convention::NAMES.to_vec(),
    };

    let mut output = Vec::with_capacity(names.len());
    for name in names {
        // Type overrides only apply to the configured convention
        let convention = if name == config.changelog.convention {
            Convention::from_config(&config)?
        } else {
            Convention::from_name(name).with_context(|| format!("cannot describe '{name}'"))?
        };
        output.push(convention.sections_help());
    }

    print!("{}", output.join("\n"));
    Ok(())
}
