//! Configuration schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagwalk_plugin::TypeTable;
use tagwalk_version::{BumpOptions, Strategy, Versioning};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Changelog configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Convention overrides.
    #[serde(default)]
    pub convention: ConventionConfig,
}

impl Config {
    /// Checks values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unusable bump token or an empty
    /// type table override.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(bump) = &self.changelog.bump {
            let versioning = self.changelog.versioning;
            if Strategy::parse(bump, versioning.strategies()).is_none() && !versioning.is_valid(bump)
            {
                return Err(ConfigError::invalid(
                    "changelog.bump",
                    format!("'{bump}' is neither a {versioning} strategy nor a {versioning} version"),
                ));
            }
        }

        if self.convention.types.as_ref().is_some_and(BTreeMap::is_empty) {
            return Err(ConfigError::invalid("convention.types", "must not be empty"));
        }

        Ok(())
    }

    /// Applies the type overrides to a convention's default table.
    #[must_use]
    pub fn type_table(&self, defaults: TypeTable) -> TypeTable {
        let mut table = defaults;
        if let Some(types) = &self.convention.types {
            table = table.with_types(types.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(minor) = &self.convention.minor_types {
            table = table.with_minor_types(minor.iter().map(String::as_str));
        }
        table
    }

    /// Returns the bump options from the changelog section.
    #[must_use]
    pub fn bump_options(&self) -> BumpOptions {
        BumpOptions::new()
            .with_zerover(self.changelog.zerover)
            .with_trim(self.changelog.trim)
    }
}

/// Changelog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Commit convention name.
    #[serde(default = "default_convention")]
    pub convention: String,

    /// Versioning scheme for tags and bumps.
    #[serde(default)]
    pub versioning: Versioning,

    /// Section type keys to render; empty means the convention's defaults.
    #[serde(default)]
    pub sections: Vec<String>,

    /// Strategy or explicit version for the unreleased changes.
    pub bump: Option<String>,

    /// Keep major at zero on breaking changes.
    #[serde(default = "default_true")]
    pub zerover: bool,

    /// Trim trailing release components (PEP 440).
    #[serde(default)]
    pub trim: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            convention: default_convention(),
            versioning: Versioning::default(),
            sections: Vec::new(),
            bump: None,
            zerover: default_true(),
            trim: false,
        }
    }
}

fn default_convention() -> String {
    "basic".to_string()
}

fn default_true() -> bool {
    true
}

/// Convention overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionConfig {
    /// Replacement type vocabulary: key to section title.
    pub types: Option<BTreeMap<String, String>>,

    /// Replacement minor-type keys.
    pub minor_types: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.changelog.convention, "basic");
        assert_eq!(config.changelog.versioning, Versioning::SemVer);
        assert!(config.changelog.sections.is_empty());
        assert!(config.changelog.bump.is_none());
        assert!(config.changelog.zerover);
        assert!(!config.changelog.trim);
        assert!(config.convention.types.is_none());
        assert!(config.convention.minor_types.is_none());
    }

    #[test]
    fn test_deserialize_empty_matches_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            [changelog]
            convention = "angular"
            versioning = "pep440"
            sections = ["feat", "fix", "docs"]
            bump = "minor+dev"
            zerover = false
            trim = true

            [convention]
            minor_types = ["feat", "perf"]

            [convention.types]
            feat = "Features"
            fix = "Fixes"
            perf = "Speed"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.changelog.convention, "angular");
        assert_eq!(config.changelog.versioning, Versioning::Pep440);
        assert_eq!(config.changelog.sections, vec!["feat", "fix", "docs"]);
        assert_eq!(config.changelog.bump.as_deref(), Some("minor+dev"));
        assert!(!config.changelog.zerover);
        assert!(config.changelog.trim);
        assert_eq!(config.convention.types.as_ref().map(BTreeMap::len), Some(3));
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_versioning_rejected() {
        let result: Result<Config, _> = toml::from_str("[changelog]\nversioning = \"calver\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_bump() {
        let mut config = Config::default();
        config.changelog.bump = Some("auto".to_string());
        assert!(config.validate().is_ok());

        config.changelog.bump = Some("v2.0.0".to_string());
        assert!(config.validate().is_ok());

        config.changelog.bump = Some("major+dev".to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid changelog.bump: 'major+dev' is neither a semver strategy nor a semver version"
        );

        config.changelog.versioning = Versioning::Pep440;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_types() {
        let mut config = Config::default();
        config.convention.types = Some(BTreeMap::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_type_table_overrides() {
        let defaults = TypeTable::new([("feat", "Features"), ("fix", "Bug Fixes")])
            .with_minor_types(["feat"]);

        assert_eq!(Config::default().type_table(defaults.clone()), defaults);

        let mut config = Config::default();
        config.convention.types = Some(BTreeMap::from([
            ("n".to_string(), "Notes".to_string()),
            ("o".to_string(), "Other".to_string()),
        ]));
        let table = config.type_table(defaults.clone());
        assert_eq!(table.title("n"), Some("Notes"));
        assert_eq!(table.title("feat"), None);
        assert_eq!(table.minor_types(), ["feat".to_string()]);

        config.convention.minor_types = Some(vec!["n".to_string(), "o".to_string()]);
        let table = config.type_table(defaults);
        assert!(table.is_minor("Notes"));
        assert!(table.is_minor("Other"));
    }

    #[test]
    fn test_bump_options() {
        let mut config = Config::default();
        assert_eq!(config.bump_options(), BumpOptions::new());

        config.changelog.zerover = false;
        config.changelog.trim = true;
        let options = config.bump_options();
        assert!(!options.zerover);
        assert!(options.trim);
    }
}
