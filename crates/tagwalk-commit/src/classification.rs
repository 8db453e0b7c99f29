//! Convention-derived commit classification.

use serde::Serialize;
use tagwalk_version::BumpLevel;

/// What a commit convention made of a commit subject.
///
/// Exactly one of `is_major`, `is_minor` and `is_patch` is set; patch is the
/// residual. Build it through [`Classification::builder`] to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Section title of the commit type (`"Features"`, `"Fixed"`, ...), or
    /// empty when the subject matched no known type.
    pub r#type: String,

    /// The optional scope.
    pub scope: Option<String>,

    /// The subject without its type and scope prefix.
    pub subject: String,

    /// Breaking change.
    pub is_major: bool,

    /// New feature.
    pub is_minor: bool,

    /// Anything else.
    pub is_patch: bool,
}

impl Classification {
    /// Creates a classification builder.
    #[must_use]
    pub fn builder(r#type: impl Into<String>) -> ClassificationBuilder {
        ClassificationBuilder::new(r#type)
    }

    /// Returns the bump level this commit calls for.
    #[must_use]
    pub fn level(&self) -> BumpLevel {
        BumpLevel::from_flags(self.is_major, self.is_minor)
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::builder("").build()
    }
}

/// Builder for [`Classification`].
#[derive(Debug)]
pub struct ClassificationBuilder {
    r#type: String,
    scope: Option<String>,
    subject: String,
    major: bool,
    minor: bool,
}

impl ClassificationBuilder {
    fn new(r#type: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            scope: None,
            subject: String::new(),
            major: false,
            minor: false,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn scope(mut self, scope: Option<impl Into<String>>) -> Self {
        self.scope = scope.map(Into::into);
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Marks a breaking change. Takes precedence over `minor`.
    #[must_use]
    pub fn major(mut self, major: bool) -> Self {
        self.major = major;
        self
    }

    /// Marks a new feature.
    #[must_use]
    pub fn minor(mut self, minor: bool) -> Self {
        self.minor = minor;
        self
    }

    /// Builds the [`Classification`].
    #[must_use]
    pub fn build(self) -> Classification {
        let is_major = self.major;
        let is_minor = !is_major && self.minor;
        Classification {
            r#type: self.r#type,
            scope: self.scope,
            subject: self.subject,
            is_major,
            is_minor,
            is_patch: !is_major && !is_minor,
        }
    }
}
