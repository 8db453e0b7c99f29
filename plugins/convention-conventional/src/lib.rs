//! Conventional Commits convention plugin.
//!
//! Uses the Angular grammar and vocabulary, plus the `!` marker before the
//! colon, which forces a major bump on its own.

use std::sync::LazyLock;

use tagwalk_commit::{Classification, CommitRecord};
use tagwalk_convention_angular::{AngularConvention, SubjectGrammar, default_sections};
use tagwalk_plugin::{CommitConvention, Plugin, PluginResult, TypeTable, has_breaking_line};

static DEFAULT_GRAMMAR: LazyLock<SubjectGrammar> = LazyLock::new(|| {
    SubjectGrammar::new(&AngularConvention::default_types(), true).expect("invalid regex")
});

/// Conventional Commits convention.
#[derive(Debug, Clone)]
pub struct ConventionalConvention {
    types: TypeTable,
    grammar: SubjectGrammar,
}

impl ConventionalConvention {
    /// Creates the convention with the Angular type table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: AngularConvention::default_types(),
            grammar: DEFAULT_GRAMMAR.clone(),
        }
    }

    /// Creates the convention with a replacement type table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table's keys do not form a valid pattern.
    pub fn with_types(types: TypeTable) -> PluginResult<Self> {
        let grammar = SubjectGrammar::new(&types, true)?;
        Ok(Self { types, grammar })
    }
}

impl Default for ConventionalConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ConventionalConvention {
    fn name(&self) -> &'static str {
        "conventional"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Classifies Conventional Commits, honoring the ! breaking marker"
    }
}

impl CommitConvention for ConventionalConvention {
    fn classify(&self, commit: &CommitRecord) -> Classification {
        let parts = self.grammar.parse(&self.types, &commit.subject);
        let is_major = parts.breaking || has_breaking_line(&commit.message());
        let is_minor = self.types.is_minor(&parts.title);

        Classification::builder(parts.title)
            .scope(parts.scope)
            .subject(parts.subject)
            .major(is_major)
            .minor(is_minor)
            .build()
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn default_sections(&self) -> Vec<String> {
        default_sections(&self.types)
    }
}
