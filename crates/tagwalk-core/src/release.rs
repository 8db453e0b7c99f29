//! Releases and their sections.

use chrono::NaiveDate;
use serde::Serialize;

/// Commits of one type within a release.
///
/// Commits are indices into the changelog's commit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub(crate) title: String,
    pub(crate) commits: Vec<usize>,
}

impl Section {
    /// Returns the section title; empty for unclassified commits.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the member commit indices, in release order.
    #[must_use]
    pub fn commits(&self) -> &[usize] {
        &self.commits
    }
}

/// The commits first introduced by a tag, or the unreleased head.
///
/// Commits are indices into the changelog's commit list; the
/// previous and next links are indices into its release list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub(crate) tag: String,
    pub(crate) date: NaiveDate,
    pub(crate) commits: Vec<usize>,
    pub(crate) sections: Vec<Section>,
    pub(crate) previous: Option<usize>,
    pub(crate) next: Option<usize>,
    pub(crate) compare_base: String,
    pub(crate) planned_tag: Option<String>,
}

impl Release {
    pub(crate) fn new(tag: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            tag: tag.into(),
            date,
            commits: Vec::new(),
            sections: Vec::new(),
            previous: None,
            next: None,
            compare_base: String::new(),
            planned_tag: None,
        }
    }

    /// Adds a commit, filing it under its section title.
    pub(crate) fn add_commit(&mut self, index: usize, title: &str) {
        self.commits.push(index);
        match self.sections.iter_mut().find(|s| s.title == title) {
            Some(section) => section.commits.push(index),
            None => self.sections.push(Section {
                title: title.to_string(),
                commits: vec![index],
            }),
        }
    }

    /// Returns the tag; empty for the unreleased release.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns true for the unreleased release.
    #[must_use]
    pub fn is_unreleased(&self) -> bool {
        self.tag.is_empty()
    }

    /// Returns the release date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the member commit indices; a tagged release starts with its
    /// anchoring commit.
    #[must_use]
    pub fn commits(&self) -> &[usize] {
        &self.commits
    }

    /// Returns every section, in first-seen order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the sections of classified commits.
    pub fn typed_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.title.is_empty())
    }

    /// Returns the section of unclassified commits, if any.
    #[must_use]
    pub fn untyped_section(&self) -> Option<&Section> {
        self.section("")
    }

    /// Returns the section with the given title.
    #[must_use]
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Returns the index of the previous release.
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    /// Returns the index of the next release.
    #[must_use]
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    /// Returns the previous release's tag, or the oldest member hash when
    /// there is no previous release.
    #[must_use]
    pub fn compare_base(&self) -> &str {
        &self.compare_base
    }

    /// Returns the tag computed by a bump, only ever set on the unreleased
    /// release.
    #[must_use]
    pub fn planned_tag(&self) -> Option<&str> {
        self.planned_tag.as_deref()
    }

    /// Returns true for an `X.0.0` tag.
    #[must_use]
    pub fn is_major(&self) -> bool {
        matches!(numeric_parts(&self.tag)[..], [_, "0", "0", ..])
    }

    /// Returns true for an `X.Y.0` tag that is not major.
    #[must_use]
    pub fn is_minor(&self) -> bool {
        matches!(numeric_parts(&self.tag)[..], [_, minor, "0", ..] if minor != "0")
    }
}

/// Splits the numeric core of a tag, ignoring a `v` prefix and any
/// qualifiers after the release numbers.
fn numeric_parts(tag: &str) -> Vec<&str> {
    let tag = tag.strip_prefix('v').unwrap_or(tag);
    let end = tag
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(tag.len());
    tag[..end].split('.').filter(|p| !p.is_empty()).collect()
}
