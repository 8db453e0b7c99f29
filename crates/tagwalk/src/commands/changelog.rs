//! Changelog command.

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tagwalk_commit::parse_log;
use tagwalk_core::{Changelog, ChangelogBuilder, Convention};
use tracing::info;

use super::{SchemeArgs, load_config};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The full model as JSON
    Json,
    /// A plain text outline of the selected sections
    Text,
}

/// Arguments for the changelog command.
#[derive(Debug, Args)]
pub struct ChangelogArgs {
    /// Log produced with `git log --format=$(tagwalk log-format)`; `-` or
    /// nothing reads stdin
    pub log: Option<PathBuf>,

    /// Commit convention (basic, angular, conventional)
    #[arg(long)]
    pub convention: Option<String>,

    /// Sections to render, as type keys or :all:
    #[arg(short, long, value_delimiter = ',')]
    pub sections: Vec<String>,

    /// Strategy or explicit version for unreleased changes
    #[arg(short, long)]
    pub bump: Option<String>,

    #[command(flatten)]
    pub scheme: SchemeArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

/// Runs the changelog command.
pub fn run(args: &ChangelogArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.scheme.apply(&mut config);
    if let Some(convention) = &args.convention {
        config.changelog.convention.clone_from(convention);
    }
    if !args.sections.is_empty() {
        config.changelog.sections.clone_from(&args.sections);
    }
    if args.bump.is_some() {
        config.changelog.bump.clone_from(&args.bump);
    }
    config.validate().context("invalid options")?;

    let text = read_log(args.log.as_deref())?;
    let commits =
        parse_log(&text, config.changelog.versioning).context("failed to parse commit log")?;
    let convention = Convention::from_config(&config).context("failed to set up convention")?;
    let changelog = ChangelogBuilder::from_config(&config)
        .build(commits, &convention)
        .context("failed to build changelog")?;

    info!(
        releases = changelog.releases().len(),
        format = ?args.format,
        "writing changelog"
    );
    match args.format {
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&changelog).context("failed to serialize changelog")?
        ),
        Format::Text => print!("{}", outline(&changelog)),
    }
    Ok(())
}

fn read_log(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read commit log from stdin")?;
            Ok(text)
        }
    }
}

/// Renders the selected sections of each release, newest first.
fn outline(changelog: &Changelog) -> String {
    let mut out = String::new();
    for release in changelog.releases() {
        let title = match (release.is_unreleased(), release.planned_tag()) {
            (true, Some(planned)) => format!("{planned} (unreleased)"),
            (true, None) => "Unreleased".to_string(),
            (false, _) => release.tag().to_string(),
        };
        _ = writeln!(
            out,
            "{title} - {} (since {})",
            release.date(),
            release.compare_base()
        );

        for title in changelog.sections() {
            let Some(section) = release.section(title) else {
                continue;
            };
            _ = writeln!(out, "  {title}");
            for commit in changelog.section_commits(section) {
                _ = writeln!(
                    out,
                    "    - {} ({})",
                    commit.classification.subject,
                    commit.short_hash()
                );
            }
        }
    }
    out
}
