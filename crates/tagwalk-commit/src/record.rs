//! Commit records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Classification;

/// Who authored or committed a change, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Timestamp in UTC.
    pub date: DateTime<Utc>,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            date,
        }
    }
}

/// A commit as read from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// The commit hash.
    pub hash: String,

    /// The author.
    pub author: Identity,

    /// The committer.
    pub committer: Identity,

    /// First line of the message.
    pub subject: String,

    /// Remaining message lines, without leading or trailing blank lines.
    pub body: Vec<String>,

    /// Parent hashes, in log order.
    pub parent_hashes: Vec<String>,

    /// The version tag on this commit, or empty.
    pub tag: String,

    /// Tag of the owning release, or `"HEAD"`; empty until resolved.
    version: String,

    /// Filled in by a commit convention.
    pub classification: Classification,
}

impl CommitRecord {
    /// Creates a commit record builder.
    #[must_use]
    pub fn builder(hash: impl Into<String>) -> CommitRecordBuilder {
        CommitRecordBuilder::new(hash)
    }

    /// Returns true if the commit carries a version tag.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        !self.tag.is_empty()
    }

    /// Returns the owning release's tag (`"HEAD"` when unreleased), or an
    /// empty string before resolution.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sets the version once. Returns false, leaving it unchanged, if it was
    /// already set.
    pub fn assign_version(&mut self, version: impl Into<String>) -> bool {
        if !self.version.is_empty() {
            return false;
        }
        self.version = version.into();
        true
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Returns the full message text (subject, blank line, body).
    #[must_use]
    pub fn message(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body.join("\n"))
        }
    }
}

/// Builder for [`CommitRecord`].
#[derive(Debug)]
pub struct CommitRecordBuilder {
    hash: String,
    author: Identity,
    committer: Identity,
    subject: String,
    body: Vec<String>,
    parent_hashes: Vec<String>,
    tag: String,
}

impl CommitRecordBuilder {
    fn new(hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            hash: hash.into(),
            author: Identity::new("", "", now),
            committer: Identity::new("", "", now),
            subject: String::new(),
            body: Vec::new(),
            parent_hashes: Vec::new(),
            tag: String::new(),
        }
    }

    /// Sets the author.
    #[must_use]
    pub fn author(mut self, author: Identity) -> Self {
        self.author = author;
        self
    }

    /// Sets the committer.
    #[must_use]
    pub fn committer(mut self, committer: Identity) -> Self {
        self.committer = committer;
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the body lines. Leading and trailing blank lines are dropped.
    #[must_use]
    pub fn body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = clean_body(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the parent hashes.
    #[must_use]
    pub fn parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_hashes = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the version tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builds the [`CommitRecord`].
    #[must_use]
    pub fn build(self) -> CommitRecord {
        CommitRecord {
            hash: self.hash,
            author: self.author,
            committer: self.committer,
            subject: self.subject,
            body: self.body,
            parent_hashes: self.parent_hashes,
            tag: self.tag,
            version: String::new(),
            classification: Classification::default(),
        }
    }
}

fn clean_body(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    lines.split_off(start)
}
