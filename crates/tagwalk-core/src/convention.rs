//! Convention selection.

use std::fmt;

use tagwalk_commit::{Classification, CommitRecord};
use tagwalk_config::Config;
use tagwalk_convention_angular::AngularConvention;
use tagwalk_convention_basic::BasicConvention;
use tagwalk_convention_conventional::ConventionalConvention;
use tagwalk_plugin::{CommitConvention, Plugin, PluginError, PluginResult, TypeTable};

use crate::CoreResult;

/// One of the built-in conventions, or a caller-supplied one.
pub enum Convention {
    /// Plain verb prefixes.
    Basic(BasicConvention),
    /// `type(scope): subject`.
    Angular(AngularConvention),
    /// Angular plus the `!` breaking marker.
    Conventional(ConventionalConvention),
    /// Any other implementation.
    Custom(Box<dyn CommitConvention>),
}

impl Convention {
    /// Names accepted by [`Convention::from_name`].
    pub const NAMES: [&'static str; 3] = ["basic", "angular", "conventional"];

    /// Creates a built-in convention with its default type table.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnknownConvention`] for an unknown name.
    pub fn from_name(name: &str) -> PluginResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic(BasicConvention::new())),
            "angular" => Ok(Self::Angular(AngularConvention::new())),
            "conventional" => Ok(Self::Conventional(ConventionalConvention::new())),
            _ => Err(PluginError::UnknownConvention(name.to_string())),
        }
    }

    /// Creates a built-in convention with a replacement type table.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or an unusable table.
    pub fn with_types(name: &str, types: TypeTable) -> PluginResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic(BasicConvention::with_types(types)?)),
            "angular" => Ok(Self::Angular(AngularConvention::with_types(types)?)),
            "conventional" => Ok(Self::Conventional(ConventionalConvention::with_types(
                types,
            )?)),
            _ => Err(PluginError::UnknownConvention(name.to_string())),
        }
    }

    /// Creates the configured convention, applying any type overrides.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown convention name or an unusable table.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let name = config.changelog.convention.as_str();
        let convention = Self::from_name(name)?;

        let overrides = &config.convention;
        if overrides.types.is_none() && overrides.minor_types.is_none() {
            return Ok(convention);
        }

        let types = config.type_table(convention.types().clone());
        Ok(Self::with_types(name, types)?)
    }

    /// Wraps a caller-supplied convention.
    #[must_use]
    pub fn custom(convention: impl CommitConvention + 'static) -> Self {
        Self::Custom(Box::new(convention))
    }

    fn inner(&self) -> &dyn CommitConvention {
        match self {
            Self::Basic(c) => c,
            Self::Angular(c) => c,
            Self::Conventional(c) => c,
            Self::Custom(c) => c.as_ref(),
        }
    }
}

impl fmt::Debug for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Convention").field(&self.name()).finish()
    }
}

impl Plugin for Convention {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn version(&self) -> &'static str {
        self.inner().version()
    }

    fn description(&self) -> &'static str {
        self.inner().description()
    }
}

impl CommitConvention for Convention {
    fn classify(&self, commit: &CommitRecord) -> Classification {
        self.inner().classify(commit)
    }

    fn types(&self) -> &TypeTable {
        self.inner().types()
    }

    fn default_sections(&self) -> Vec<String> {
        self.inner().default_sections()
    }

    fn sections(&self, names: &[String]) -> PluginResult<Vec<String>> {
        self.inner().sections(names)
    }

    fn sections_help(&self) -> String {
        self.inner().sections_help()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::CoreError;

    fn commit(subject: &str) -> CommitRecord {
        CommitRecord::builder("abc123").subject(subject).build()
    }

    #[test]
    fn test_from_name() {
        for name in Convention::NAMES {
            assert_eq!(Convention::from_name(name).unwrap().name(), name);
        }
        assert_eq!(Convention::from_name("Angular").unwrap().name(), "angular");
    }

    #[test]
    fn test_from_name_unknown() {
        let err = Convention::from_name("gitmoji").unwrap_err();
        assert!(matches!(err, PluginError::UnknownConvention(name) if name == "gitmoji"));
    }

    #[test]
    fn test_delegates_classification() {
        let convention = Convention::from_name("conventional").unwrap();
        let classification = convention.classify(&commit("feat!: drop v1 api"));
        assert_eq!(classification.r#type, "Features");
        assert!(classification.is_major);
    }

    #[test]
    fn test_from_config_defaults() {
        let convention = Convention::from_config(&Config::default()).unwrap();
        assert_eq!(convention.name(), "basic");
        assert_eq!(
            convention.default_sections(),
            vec!["Added", "Fixed", "Changed", "Removed"]
        );
    }

    #[test]
    fn test_from_config_type_overrides() {
        let mut config = Config::default();
        config.changelog.convention = "angular".to_string();
        config.convention.types = Some(BTreeMap::from([
            ("n".to_string(), "Notes".to_string()),
            ("o".to_string(), "Other".to_string()),
        ]));
        config.convention.minor_types = Some(vec!["n".to_string()]);

        let convention = Convention::from_config(&config).unwrap();
        let classification = convention.classify(&commit("n(core): add notes"));
        assert_eq!(classification.r#type, "Notes");
        assert_eq!(classification.scope.as_deref(), Some("core"));
        assert!(classification.is_minor);

        assert_eq!(convention.classify(&commit("feat: gone")).r#type, "");
    }

    #[test]
    fn test_from_config_unknown() {
        let mut config = Config::default();
        config.changelog.convention = "atom".to_string();
        assert!(matches!(
            Convention::from_config(&config),
            Err(CoreError::Plugin(PluginError::UnknownConvention(_)))
        ));
    }

    #[test]
    fn test_custom() {
        let convention = Convention::custom(BasicConvention::new());
        assert!(matches!(convention, Convention::Custom(_)));
        assert_eq!(convention.name(), "basic");
        assert_eq!(format!("{convention:?}"), r#"Convention("basic")"#);
        assert_eq!(convention.classify(&commit("Add x")).r#type, "Added");
    }
}
