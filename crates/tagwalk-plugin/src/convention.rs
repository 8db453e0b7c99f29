//! Commit convention trait.

use std::sync::LazyLock;

use regex::Regex;
use tagwalk_commit::{Classification, CommitRecord};

use crate::{Plugin, PluginError, PluginResult, TypeTable};

/// Section name selecting every title of the type table.
pub const ALL_SECTIONS: &str = ":all:";

static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^break(s|ing changes?)?[ :].+$").expect("invalid regex")
});

/// Returns true if any line of `message` announces a breaking change
/// (`BREAKING CHANGE: ...`, `breaks: ...`, `Break ...`).
#[must_use]
pub fn has_breaking_line(message: &str) -> bool {
    BREAK_RE.is_match(message)
}

/// Classifies commits into typed changelog sections and bump levels.
pub trait CommitConvention: Plugin {
    /// Classifies a commit from its subject and body.
    fn classify(&self, commit: &CommitRecord) -> Classification;

    /// Returns the type vocabulary in use.
    fn types(&self) -> &TypeTable;

    /// Returns the section titles rendered when none are requested.
    fn default_sections(&self) -> Vec<String>;

    /// Stores the classification on the commit.
    fn apply(&self, commit: &mut CommitRecord) {
        commit.classification = self.classify(commit);
    }

    /// Resolves requested section names (type keys) to section titles.
    ///
    /// An empty request yields [`CommitConvention::default_sections`];
    /// [`ALL_SECTIONS`] yields every title.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownSection`] for a key missing from the table.
    fn sections(&self, names: &[String]) -> PluginResult<Vec<String>> {
        if names.is_empty() {
            return Ok(self.default_sections());
        }

        let types = self.types();
        if names.iter().any(|name| name == ALL_SECTIONS) {
            return Ok(types.titles().into_iter().map(String::from).collect());
        }

        let mut titles: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let title = types.title(name).ok_or_else(|| PluginError::UnknownSection {
                name: name.clone(),
                expected: types.keys().collect::<Vec<_>>().join(", "),
            })?;
            if !titles.iter().any(|t| t == title) {
                titles.push(title.to_string());
            }
        }
        Ok(titles)
    }

    /// Describes default and additional sections with their keys.
    fn sections_help(&self) -> String {
        let types = self.types();
        let defaults = self.default_sections();
        let line = |title: &str| {
            let keys: Vec<&str> = types
                .keys()
                .filter(|key| types.title(key) == Some(title))
                .collect();
            format!("- {}: {title}", keys.join(", "))
        };

        let mut help = format!("{} convention\n\nDefault sections:\n", self.name());
        for title in &defaults {
            help.push_str(&line(title));
            help.push('\n');
        }
        help.push_str("\nAdditional sections:\n");
        for title in types.titles() {
            if !defaults.iter().any(|d| d == title) {
                help.push_str(&line(title));
                help.push('\n');
            }
        }
        help
    }
}
