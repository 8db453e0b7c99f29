//! Changelog model assembly.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use tagwalk_commit::CommitRecord;
use tagwalk_config::Config;
use tagwalk_plugin::CommitConvention;
use tagwalk_version::{BumpLevel, BumpOptions, Versioning};
use tracing::{debug, info};

use crate::{CoreResult, Release, Resolver, Section};

/// Releases of a history, newest first, ready for rendering.
#[derive(Debug, Clone)]
pub struct Changelog {
    versioning: Versioning,
    commits: Vec<CommitRecord>,
    releases: Vec<Release>,
    sections: Vec<String>,
}

impl Changelog {
    /// Creates a changelog builder.
    #[must_use]
    pub fn builder() -> ChangelogBuilder {
        ChangelogBuilder::new()
    }

    /// Returns the versioning scheme.
    #[must_use]
    pub fn versioning(&self) -> Versioning {
        self.versioning
    }

    /// Returns every commit, in log order.
    #[must_use]
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    /// Returns the releases, newest first.
    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Returns the release with the given tag; `""` is the unreleased one.
    #[must_use]
    pub fn release(&self, tag: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.tag() == tag)
    }

    /// Returns the section titles to render, in order.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Returns the commits of a release, anchor first.
    pub fn members<'a>(&'a self, release: &'a Release) -> impl Iterator<Item = &'a CommitRecord> {
        release.commits().iter().map(|&i| &self.commits[i])
    }

    /// Returns the commits of a section.
    pub fn section_commits<'a>(
        &'a self,
        section: &'a Section,
    ) -> impl Iterator<Item = &'a CommitRecord> {
        section.commits().iter().map(|&i| &self.commits[i])
    }

    /// Returns the release a release follows.
    #[must_use]
    pub fn previous(&self, release: &Release) -> Option<&Release> {
        release.previous().map(|i| &self.releases[i])
    }

    /// Returns the release that follows a release.
    #[must_use]
    pub fn next(&self, release: &Release) -> Option<&Release> {
        release.next().map(|i| &self.releases[i])
    }

    /// Returns the level of change the release's commits call for.
    #[must_use]
    pub fn level(&self, release: &Release) -> BumpLevel {
        self.members(release)
            .map(|commit| commit.classification.level())
            .max()
            .unwrap_or_default()
    }

    fn bump(&mut self, token: &str, options: BumpOptions) -> CoreResult<()> {
        let Some(latest) = self.releases.first() else {
            debug!("empty history, nothing to bump");
            return Ok(());
        };
        if !latest.is_unreleased() {
            debug!(tag = %latest.tag(), "history ends on a tag, nothing to bump");
            return Ok(());
        }

        let base = self
            .previous(latest)
            .map_or(self.versioning.initial(), Release::tag)
            .to_string();
        let level = self.level(latest);
        let planned = self
            .versioning
            .bump(&base, token, &options.with_level(level))?;

        info!(%base, %planned, %level, strategy = token, "planned next version");
        self.releases[0].planned_tag = Some(planned);
        Ok(())
    }
}

/// Builder for [`Changelog`].
#[derive(Debug, Clone)]
pub struct ChangelogBuilder {
    versioning: Versioning,
    sections: Vec<String>,
    bump: Option<String>,
    options: BumpOptions,
    today: Option<NaiveDate>,
}

impl ChangelogBuilder {
    fn new() -> Self {
        Self {
            versioning: Versioning::default(),
            sections: Vec::new(),
            bump: None,
            options: BumpOptions::new(),
            today: None,
        }
    }

    /// Creates a builder from the changelog configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            versioning: config.changelog.versioning,
            sections: config.changelog.sections.clone(),
            bump: config.changelog.bump.clone(),
            options: config.bump_options(),
            today: None,
        }
    }

    /// Sets the versioning scheme.
    #[must_use]
    pub fn versioning(mut self, versioning: Versioning) -> Self {
        self.versioning = versioning;
        self
    }

    /// Sets the requested section names (type keys or `:all:`).
    #[must_use]
    pub fn sections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the strategy or explicit version for the unreleased release.
    #[must_use]
    pub fn bump(mut self, bump: Option<impl Into<String>>) -> Self {
        self.bump = bump.map(Into::into);
        self
    }

    /// Sets the bump options.
    #[must_use]
    pub fn options(mut self, options: BumpOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the date given to the unreleased release.
    #[must_use]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Classifies and resolves `commits` (newest first), then applies the
    /// bump, if any.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown section names or a failed bump.
    pub fn build(
        self,
        mut commits: Vec<CommitRecord>,
        convention: &dyn CommitConvention,
    ) -> CoreResult<Changelog> {
        for commit in &mut commits {
            convention.apply(commit);
        }
        let sections = convention.sections(&self.sections)?;

        let mut resolver = Resolver::new(self.versioning);
        if let Some(today) = self.today {
            resolver = resolver.with_today(today);
        }
        let releases = resolver.resolve(&mut commits);

        let mut changelog = Changelog {
            versioning: self.versioning,
            commits,
            releases,
            sections,
        };
        if let Some(token) = &self.bump {
            changelog.bump(token, self.options)?;
        }

        info!(
            convention = %convention.identity(),
            commits = changelog.commits.len(),
            releases = changelog.releases.len(),
            "built changelog"
        );
        Ok(changelog)
    }
}

#[derive(Serialize)]
struct ChangelogView<'a> {
    versioning: Versioning,
    sections: &'a [String],
    releases: Vec<ReleaseView<'a>>,
}

#[derive(Serialize)]
struct ReleaseView<'a> {
    tag: &'a str,
    date: NaiveDate,
    planned_tag: Option<&'a str>,
    previous_version: Option<&'a str>,
    next_version: Option<&'a str>,
    compare_base: &'a str,
    sections: Vec<SectionView<'a>>,
    commits: Vec<&'a CommitRecord>,
}

#[derive(Serialize)]
struct SectionView<'a> {
    title: &'a str,
    commits: Vec<&'a str>,
}

impl Serialize for Changelog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let releases = self
            .releases
            .iter()
            .map(|release| ReleaseView {
                tag: release.tag(),
                date: release.date(),
                planned_tag: release.planned_tag(),
                previous_version: self.previous(release).map(Release::tag),
                next_version: self.next(release).map(Release::tag),
                compare_base: release.compare_base(),
                sections: release
                    .sections()
                    .iter()
                    .map(|section| SectionView {
                        title: section.title(),
                        commits: self
                            .section_commits(section)
                            .map(|c| c.hash.as_str())
                            .collect(),
                    })
                    .collect(),
                commits: self.members(release).collect(),
            })
            .collect();

        ChangelogView {
            versioning: self.versioning,
            sections: &self.sections,
            releases,
        }
        .serialize(serializer)
    }
}
