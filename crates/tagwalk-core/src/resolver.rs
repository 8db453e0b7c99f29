//! Commit graph resolution.
//!
//! Partitions a log into releases. Each tag, oldest first, claims every
//! commit reachable through parent links that no earlier tag claimed,
//! stopping at other tags. The highest of those tags becomes the release's
//! previous version. The newest commit anchors the unreleased release when
//! it is untagged, and anything left over joins it.

use std::collections::{HashMap, VecDeque};

use chrono::{NaiveDate, Utc};
use tagwalk_commit::CommitRecord;
use tagwalk_version::{ParsedVersion, Versioning};
use tracing::{debug, trace};

use crate::Release;

/// Version recorded on commits of the unreleased release.
pub const UNRELEASED_VERSION: &str = "HEAD";

/// Groups commits into releases by walking the commit graph.
#[derive(Debug, Clone)]
pub struct Resolver {
    versioning: Versioning,
    today: NaiveDate,
}

/// A release under construction; members and tag holder are commit indices.
#[derive(Debug)]
struct Group {
    tag: String,
    anchor: Option<usize>,
    members: Vec<usize>,
    best: Option<(ParsedVersion, usize)>,
}

impl Group {
    fn new(tag: impl Into<String>, anchor: Option<usize>) -> Self {
        Self {
            tag: tag.into(),
            anchor,
            members: Vec::new(),
            best: None,
        }
    }
}

impl Resolver {
    /// Creates a resolver comparing tags under `versioning`.
    #[must_use]
    pub fn new(versioning: Versioning) -> Self {
        Self {
            versioning,
            today: Utc::now().date_naive(),
        }
    }

    /// Sets the date given to the unreleased release.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Resolves releases for commits given newest first.
    ///
    /// Every commit ends up in exactly one release and gets that release's
    /// tag (or [`UNRELEASED_VERSION`]) as its version. Releases are returned
    /// newest first; commit indices refer to `commits`.
    ///
    /// Parents missing from `commits` end their branch of the walk.
    pub fn resolve(&self, commits: &mut [CommitRecord]) -> Vec<Release> {
        let (groups, owner) = self.group(commits);
        let count = groups.len();
        let position = |id: usize| count - 1 - id;

        let mut releases: Vec<Release> = groups
            .iter()
            .rev()
            .map(|group| self.release(commits, group))
            .collect();

        for (id, group) in groups.iter().enumerate() {
            let at = position(id);
            match group.best.as_ref().and_then(|(_, holder)| owner[*holder]) {
                Some(previous_id) => {
                    let previous = position(previous_id);
                    let base = releases[previous].tag.clone();
                    releases[previous].next = Some(at);
                    releases[at].previous = Some(previous);
                    releases[at].compare_base = base;
                }
                None => {
                    releases[at].compare_base = group
                        .members
                        .last()
                        .map(|&i| commits[i].hash.clone())
                        .unwrap_or_default();
                }
            }
        }

        for group in &groups {
            let version = if group.tag.is_empty() {
                UNRELEASED_VERSION
            } else {
                group.tag.as_str()
            };
            for &index in &group.members {
                if !commits[index].assign_version(version) {
                    trace!(hash = %commits[index].short_hash(), "commit already resolved");
                }
            }
        }

        debug!(
            commits = commits.len(),
            releases = releases.len(),
            "resolved releases"
        );
        releases
    }

    /// Assigns every commit to a group; returns the groups oldest first and
    /// the owning group of each commit.
    fn group(&self, commits: &[CommitRecord]) -> (Vec<Group>, Vec<Option<usize>>) {
        let index: HashMap<&str, usize> = commits
            .iter()
            .enumerate()
            .map(|(i, commit)| (commit.hash.as_str(), i))
            .collect();
        let mut owner: Vec<Option<usize>> = vec![None; commits.len()];
        let mut groups: Vec<Group> = Vec::new();

        let mut anchors: Vec<usize> = (0..commits.len())
            .filter(|&i| commits[i].is_tagged())
            .rev()
            .collect();
        if commits.first().is_some_and(|head| !head.is_tagged()) {
            anchors.push(0);
        }

        for anchor in anchors {
            if owner[anchor].is_some() {
                trace!(hash = %commits[anchor].short_hash(), "head already claimed by a tag");
                continue;
            }
            let group = self.walk(commits, &index, &mut owner, groups.len(), anchor);
            groups.push(group);
        }

        let leftovers: Vec<usize> = (0..commits.len()).filter(|&i| owner[i].is_none()).collect();
        if !leftovers.is_empty() {
            debug!(count = leftovers.len(), "sweeping unreachable commits into unreleased");
            let id = match groups.iter().position(|g| g.tag.is_empty()) {
                Some(id) => id,
                None => {
                    groups.push(Group::new("", None));
                    groups.len() - 1
                }
            };
            for i in leftovers {
                owner[i] = Some(id);
                groups[id].members.push(i);
            }
        }

        (groups, owner)
    }

    /// Breadth-first walk from `anchor`, claiming unowned untagged commits.
    fn walk(
        &self,
        commits: &[CommitRecord],
        index: &HashMap<&str, usize>,
        owner: &mut [Option<usize>],
        id: usize,
        anchor: usize,
    ) -> Group {
        let mut group = Group::new(commits[anchor].tag.as_str(), Some(anchor));
        owner[anchor] = Some(id);
        group.members.push(anchor);

        let mut queue: VecDeque<usize> = parents(commits, index, anchor).collect();
        while let Some(current) = queue.pop_front() {
            let commit = &commits[current];
            if commit.is_tagged() {
                match self.versioning.parse(&commit.tag) {
                    Ok(version) => {
                        if group.best.as_ref().is_none_or(|(best, _)| version > *best) {
                            group.best = Some((version, current));
                        }
                    }
                    Err(err) => debug!(tag = %commit.tag, %err, "ignoring unparseable tag"),
                }
            } else if owner[current].is_none() {
                owner[current] = Some(id);
                group.members.push(current);
                queue.extend(parents(commits, index, current));
            }
        }

        trace!(
            tag = %group.tag,
            members = group.members.len(),
            previous = ?group.best.as_ref().map(|(version, _)| version.to_string()),
            "walked release"
        );
        group
    }

    fn release(&self, commits: &[CommitRecord], group: &Group) -> Release {
        let date = match group.anchor {
            Some(anchor) if !group.tag.is_empty() => commits[anchor].committer.date.date_naive(),
            _ => self.today,
        };

        let mut release = Release::new(group.tag.as_str(), date);
        for &i in &group.members {
            release.add_commit(i, &commits[i].classification.r#type);
        }
        release
    }
}

/// Indices of a commit's parents that are present in the log.
fn parents<'a>(
    commits: &'a [CommitRecord],
    index: &'a HashMap<&str, usize>,
    at: usize,
) -> impl Iterator<Item = usize> + 'a {
    let commit = &commits[at];
    commit.parent_hashes.iter().filter_map(move |hash| {
        let found = index.get(hash.as_str()).copied();
        if found.is_none() {
            trace!(%hash, child = %commit.short_hash(), "parent outside the log");
        }
        found
    })
}
