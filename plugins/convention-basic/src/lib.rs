//! Basic commit convention plugin.
//!
//! Commit types are plain verbs at the start of the subject (`Add`, `Fix`,
//! `Change`, ...), matched case-insensitively.

use std::sync::LazyLock;

use regex::Regex;
use tagwalk_commit::{Classification, CommitRecord};
use tagwalk_plugin::{CommitConvention, Plugin, PluginResult, TypeTable, has_breaking_line};

static DEFAULT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    type_regex(&BasicConvention::default_types()).expect("invalid regex")
});

fn type_regex(types: &TypeTable) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)^(?P<type>{})", types.alternation()))
}

/// Basic commit convention.
#[derive(Debug, Clone)]
pub struct BasicConvention {
    types: TypeTable,
    type_re: Regex,
}

impl BasicConvention {
    /// Creates the convention with its default type table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: Self::default_types(),
            type_re: DEFAULT_TYPE_RE.clone(),
        }
    }

    /// Creates the convention with a replacement type table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table's keys do not form a valid pattern.
    pub fn with_types(types: TypeTable) -> PluginResult<Self> {
        let type_re = type_regex(&types)?;
        Ok(Self { types, type_re })
    }

    /// Returns the default type table; `add` is the minor type.
    #[must_use]
    pub fn default_types() -> TypeTable {
        TypeTable::new([
            ("add", "Added"),
            ("fix", "Fixed"),
            ("change", "Changed"),
            ("remove", "Removed"),
            ("merge", "Merged"),
            ("doc", "Documented"),
        ])
        .with_minor_types(["add"])
    }

    fn parse_type(&self, subject: &str) -> String {
        let Some(word) = self
            .type_re
            .captures(subject)
            .and_then(|captures| captures.name("type"))
            .map(|m| m.as_str().to_lowercase())
        else {
            return String::new();
        };

        // Keys keep their configured case; the prefix matches any case.
        self.types
            .keys()
            .find(|key| key.to_lowercase() == word)
            .and_then(|key| self.types.title(key))
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for BasicConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for BasicConvention {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Classifies commits starting with Add, Fix, Change, Remove, Merge or Doc"
    }
}

impl CommitConvention for BasicConvention {
    fn classify(&self, commit: &CommitRecord) -> Classification {
        let commit_type = self.parse_type(&commit.subject);
        let is_major = has_breaking_line(&commit.message());
        let is_minor = self.types.is_minor(&commit_type);

        Classification::builder(commit_type)
            .subject(commit.subject.as_str())
            .major(is_major)
            .minor(is_minor)
            .build()
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn default_sections(&self) -> Vec<String> {
        ["add", "fix", "change", "remove"]
            .iter()
            .filter_map(|key| self.types.title(key))
            .map(String::from)
            .collect()
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
        BasicConvention::new().classify(&commit)
    }

    #[test]
    fn test_minor_commit() {
        let classification = classify("Add a new feature", &[]);
        assert_eq!(classification.r#type, "Added");
        assert!(classification.scope.is_none());
        assert!(!classification.is_major);
        assert!(classification.is_minor);
        assert!(!classification.is_patch);
    }

    #[test]
    fn test_case_insensitive_type() {
        assert_eq!(classify("FIX crash on start", &[]).r#type, "Fixed");
        assert_eq!(classify("removed old flag", &[]).r#type, "Removed");
        assert_eq!(classify("Documentation update", &[]).r#type, "Documented");
    }

    #[test]
    fn test_patch_commit() {
        let classification = classify("Fix a bug", &[]);
        assert_eq!(classification.r#type, "Fixed");
        assert!(classification.is_patch);
    }

    #[test]
    fn test_untyped_commit() {
        let classification = classify("Bump dependencies", &[]);
        assert_eq!(classification.r#type, "");
        assert!(classification.is_patch);
        assert_eq!(classification.subject, "Bump dependencies");
    }

    #[test]
    fn test_major_commit() {
        let classification = classify("Add a new feature", &["", "Breaking change: removed the old one"]);
        assert!(classification.is_major);
        assert!(!classification.is_minor);
        assert!(!classification.is_patch);
    }

    #[test]
    fn test_break_in_subject() {
        assert!(classify("Breaks: configuration format", &[]).is_major);
    }

    #[test]
    fn test_custom_types() {
        let types = TypeTable::new([("n", "Notes"), ("o", "Other"), ("d", "Draft")])
            .with_minor_types(["n", "o"]);
        let convention = BasicConvention::with_types(types).unwrap();
        let commit = CommitRecord::builder("abc")
            .subject("n: Added a new feature")
            .build();
        let classification = convention.classify(&commit);
        assert_eq!(classification.r#type, "Notes");
        assert!(!classification.is_major);
        assert!(classification.is_minor);
        assert!(!classification.is_patch);
    }

    #[test]
    fn test_custom_types_match_any_case() {
        let types = TypeTable::new([("N", "Notes"), ("Tweak", "Tweaked")]).with_minor_types(["N"]);
        let convention = BasicConvention::with_types(types).unwrap();

        for (subject, title) in [
            ("N: new flag", "Notes"),
            ("n: new flag", "Notes"),
            ("tweak the parser", "Tweaked"),
            ("TWEAK the parser", "Tweaked"),
        ] {
            let commit = CommitRecord::builder("abc").subject(subject).build();
            assert_eq!(convention.classify(&commit).r#type, title, "{subject}");
        }
    }

    #[test]
    fn test_default_sections() {
        assert_eq!(
            BasicConvention::new().default_sections(),
            vec!["Added", "Fixed", "Changed", "Removed"]
        );
    }

    #[test]
    fn test_sections_help() {
        insta::assert_snapshot!(BasicConvention::new().sections_help().trim_end(), @r"
        basic convention

        Default sections:
        - add: Added
        - fix: Fixed
        - change: Changed
        - remove: Removed

        Additional sections:
        - merge: Merged
        - doc: Documented
        ");
    }

    #[test]
    fn test_plugin_metadata() {
        let convention = BasicConvention::default();
        assert_eq!(convention.name(), "basic");
        assert_eq!(convention.version(), env!("CARGO_PKG_VERSION"));
        assert!(!convention.description().is_empty());
    }
}
