//! Angular commit convention plugin.
//!
//! Subjects follow `type(scope): subject` against a fixed type vocabulary.
//! The [`SubjectGrammar`] is shared with the Conventional Commits plugin,
//! which adds the `!` breaking marker.

use std::sync::LazyLock;

use regex::Regex;
use tagwalk_commit::{Classification, CommitRecord};
use tagwalk_plugin::{CommitConvention, Plugin, PluginResult, TypeTable, has_breaking_line};

static DEFAULT_GRAMMAR: LazyLock<SubjectGrammar> = LazyLock::new(|| {
    SubjectGrammar::new(&AngularConvention::default_types(), false).expect("invalid regex")
});

/// Type keys rendered by default, in order.
pub const DEFAULT_SECTION_KEYS: [&str; 5] = ["feat", "fix", "revert", "refactor", "perf"];

/// Parts of a subject matched by a [`SubjectGrammar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectParts {
    /// Section title of the type, or empty when the subject did not match.
    pub title: String,
    /// The scope between parentheses.
    pub scope: Option<String>,
    /// The subject after `: `, or the whole subject when it did not match.
    pub subject: String,
    /// Whether the `!` marker was present.
    pub breaking: bool,
}

/// Compiled `type(scope)!: subject` grammar for a type table.
#[derive(Debug, Clone)]
pub struct SubjectGrammar {
    regex: Regex,
}

impl SubjectGrammar {
    /// Compiles the grammar; `breaking_marker` accepts `!` before the colon.
    ///
    /// # Errors
    ///
    /// Returns an error if the table's keys do not form a valid pattern.
    pub fn new(types: &TypeTable, breaking_marker: bool) -> PluginResult<Self> {
        let marker = if breaking_marker { "(?P<breaking>!)?" } else { "" };
        let regex = Regex::new(&format!(
            r"^(?P<type>{})(?:\((?P<scope>.+)\))?{marker}: (?P<subject>.+)$",
            types.alternation()
        ))?;
        Ok(Self { regex })
    }

    /// Splits a subject into its parts, resolving the type through `types`.
    #[must_use]
    pub fn parse(&self, types: &TypeTable, subject: &str) -> SubjectParts {
        let Some(captures) = self.regex.captures(subject) else {
            return SubjectParts {
                title: String::new(),
                scope: None,
                subject: subject.to_string(),
                breaking: false,
            };
        };

        let title = captures
            .name("type")
            .and_then(|m| types.title(m.as_str()))
            .unwrap_or_default()
            .to_string();

        SubjectParts {
            title,
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            subject: captures
                .name("subject")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            breaking: captures.name("breaking").is_some(),
        }
    }
}

/// Angular commit convention.
#[derive(Debug, Clone)]
pub struct AngularConvention {
    types: TypeTable,
    grammar: SubjectGrammar,
}

impl AngularConvention {
    /// Creates the convention with its default type table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: Self::default_types(),
            grammar: DEFAULT_GRAMMAR.clone(),
        }
    }

    /// Creates the convention with a replacement type table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table's keys do not form a valid pattern.
    pub fn with_types(types: TypeTable) -> PluginResult<Self> {
        let grammar = SubjectGrammar::new(&types, false)?;
        Ok(Self { types, grammar })
    }

    /// Returns the default type table; `feat` is the minor type.
    #[must_use]
    pub fn default_types() -> TypeTable {
        TypeTable::new([
            ("build", "Build"),
            ("chore", "Chore"),
            ("ci", "Continuous Integration"),
            ("deps", "Dependencies"),
            ("doc", "Docs"),
            ("docs", "Docs"),
            ("feat", "Features"),
            ("fix", "Bug Fixes"),
            ("perf", "Performance Improvements"),
            ("ref", "Code Refactoring"),
            ("refactor", "Code Refactoring"),
            ("revert", "Reverts"),
            ("style", "Style"),
            ("test", "Tests"),
            ("tests", "Tests"),
        ])
        .with_minor_types(["feat"])
    }
}

/// Resolves [`DEFAULT_SECTION_KEYS`] through a type table.
#[must_use]
pub fn default_sections(types: &TypeTable) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for title in DEFAULT_SECTION_KEYS.iter().filter_map(|key| types.title(key)) {
        if !titles.iter().any(|t| t == title) {
            titles.push(title.to_string());
        }
    }
    titles
}

impl Default for AngularConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for AngularConvention {
    fn name(&self) -> &'static str {
        "angular"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Classifies commits written as type(scope): subject"
    }
}

impl CommitConvention for AngularConvention {
    fn classify(&self, commit: &CommitRecord) -> Classification {
        let parts = self.grammar.parse(&self.types, &commit.subject);
        let is_major = has_breaking_line(&commit.message());
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

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(subject: &str, body: &[&str]) -> Classification {
        let commit = CommitRecord::builder("abc123")
            .subject(subject)
            .body(body.iter().copied())
            .build();
        AngularConvention::new().classify(&commit)
    }

    #[test]
    fn test_minor_commit() {
        let classification = classify("feat: Added a new feature", &[]);
        assert_eq!(classification.r#type, "Features");
        assert!(classification.scope.is_none());
        assert_eq!(classification.subject, "Added a new feature");
        assert!(!classification.is_major);
        assert!(classification.is_minor);
        assert!(!classification.is_patch);
    }

    #[test]
    fn test_scope() {
        let classification = classify("fix(parser): handle edge case", &[]);
        assert_eq!(classification.r#type, "Bug Fixes");
        assert_eq!(classification.scope.as_deref(), Some("parser"));
        assert_eq!(classification.subject, "handle edge case");
        assert!(classification.is_patch);
    }

    #[test]
    fn test_major_commit() {
        let classification = classify(
            "feat: Added a new feature",
            &["", "BREAKING CHANGE: removed the old one"],
        );
        assert!(classification.is_major);
        assert!(!classification.is_minor);
        assert!(!classification.is_patch);
    }

    #[test]
    fn test_shared_titles() {
        assert_eq!(classify("docs: update readme", &[]).r#type, "Docs");
        assert_eq!(classify("doc: update readme", &[]).r#type, "Docs");
        assert_eq!(classify("refactor: split module", &[]).r#type, "Code Refactoring");
        assert_eq!(classify("tests: cover resolver", &[]).r#type, "Tests");
    }

    #[test]
    fn test_case_sensitive_types() {
        let classification = classify("Feat: shout", &[]);
        assert_eq!(classification.r#type, "");
        assert_eq!(classification.subject, "Feat: shout");
    }

    #[test]
    fn test_no_match() {
        let classification = classify("random commit message", &[]);
        assert_eq!(classification.r#type, "");
        assert!(classification.scope.is_none());
        assert_eq!(classification.subject, "random commit message");
        assert!(classification.is_patch);
    }

    #[test]
    fn test_breaking_marker_not_recognized() {
        let classification = classify("feat!: drop support", &[]);
        assert_eq!(classification.r#type, "");
        assert!(classification.is_patch);
    }

    #[test]
    fn test_custom_types() {
        let types = TypeTable::new([("n", "Notes"), ("o", "Other"), ("d", "Draft")])
            .with_minor_types(["n", "o"]);
        let convention = AngularConvention::with_types(types).unwrap();
        let commit = CommitRecord::builder("abc")
            .subject("n: Added a new feature")
            .build();
        let classification = convention.classify(&commit);
        assert_eq!(classification.r#type, "Notes");
        assert!(classification.is_minor);
        assert!(convention.default_sections().is_empty());
    }

    #[test]
    fn test_default_sections() {
        insta::assert_debug_snapshot!(AngularConvention::new().default_sections(), @r#"
        [
            "Features",
            "Bug Fixes",
            "Reverts",
            "Code Refactoring",
            "Performance Improvements",
        ]
        "#);
    }

    #[test]
    fn test_plugin_metadata() {
        let convention = AngularConvention::default();
        assert_eq!(convention.name(), "angular");
        assert_eq!(convention.version(), env!("CARGO_PKG_VERSION"));
        assert!(!convention.description().is_empty());
    }
}
