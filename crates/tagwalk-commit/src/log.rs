//! Parsing of fixed-format log blocks.

use chrono::{DateTime, Utc};
use tagwalk_version::Versioning;
use tracing::{debug, trace};

use crate::{CommitError, CommitRecord, CommitResult, Identity};

/// Line terminating each commit block.
pub const LOG_MARKER: &str = "--TAGWALK-COMMIT-END--";

/// `git log --format` string producing the blocks [`parse_log`] reads.
///
/// Fields, one per line: hash, author name, author email, author timestamp,
/// committer name, committer email, committer timestamp, refs, parent hashes,
/// subject, then body lines up to [`LOG_MARKER`].
pub const LOG_FORMAT: &str = "%H%n%an%n%ae%n%at%n%cn%n%ce%n%ct%n%D%n%P%n%s%n%b%n--TAGWALK-COMMIT-END--";

const FIELDS: [&str; 10] = [
    "hash",
    "author name",
    "author email",
    "author date",
    "committer name",
    "committer email",
    "committer date",
    "refs",
    "parents",
    "subject",
];

/// Parses a whole log into records, newest first as given.
///
/// # Errors
///
/// Returns [`CommitError::TruncatedBlock`] if a block misses fields or its
/// marker, and [`CommitError::InvalidDate`] for malformed timestamps.
pub fn parse_log(text: &str, versioning: Versioning) -> CommitResult<Vec<CommitRecord>> {
    let mut commits = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line == LOG_MARKER {
            commits.push(CommitRecord::from_block(&block, versioning)?);
            block.clear();
        } else if !block.is_empty() || !line.trim().is_empty() {
            block.push(line);
        }
    }

    if !block.is_empty() {
        return Err(CommitError::TruncatedBlock {
            hash: block[0].to_string(),
            missing: "end marker",
        });
    }

    debug!(count = commits.len(), "parsed log");
    Ok(commits)
}

impl CommitRecord {
    /// Builds a record from one block's lines, marker excluded.
    ///
    /// Only `tag: X` refs whose `X` parses under `versioning` are kept; the
    /// first one becomes the tag.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::TruncatedBlock`] if fixed fields are missing and
    /// [`CommitError::InvalidDate`] if a timestamp is malformed.
    pub fn from_block(lines: &[&str], versioning: Versioning) -> CommitResult<Self> {
        if lines.len() < FIELDS.len() {
            return Err(CommitError::TruncatedBlock {
                hash: lines.first().map(|hash| (*hash).to_string()).unwrap_or_default(),
                missing: FIELDS[lines.len()],
            });
        }

        let hash = lines[0].trim();
        let author = Identity::new(lines[1], lines[2], parse_timestamp("author date", lines[3])?);
        let committer =
            Identity::new(lines[4], lines[5], parse_timestamp("committer date", lines[6])?);
        let tag = version_tag(hash, lines[7], versioning);
        let body = lines[10..]
            .iter()
            .map(|line| line.trim_end_matches('\r'));

        trace!(hash = %hash, tag = %tag, "parsed commit block");

        Ok(Self::builder(hash)
            .author(author)
            .committer(committer)
            .tag(tag)
            .parents(lines[8].split_whitespace())
            .subject(lines[9].trim_end_matches('\r'))
            .body(body)
            .build())
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> CommitResult<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Utc::now());
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .ok_or_else(|| CommitError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn version_tag(hash: &str, refs: &str, versioning: Versioning) -> String {
    for reference in refs.split(',').map(str::trim) {
        let Some(name) = reference.strip_prefix("tag: ") else {
            continue;
        };
        if versioning.is_valid(name) {
            return name.to_string();
        }
        debug!(hash = %hash, tag = %name, scheme = %versioning, "ignoring non-version tag");
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(hash: &str, refs: &str, parents: &str, subject: &str, body: &[&str]) -> String {
        let mut lines = vec![
            hash.to_string(),
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "1700000000".to_string(),
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "1700000100".to_string(),
            refs.to_string(),
            parents.to_string(),
            subject.to_string(),
        ];
        lines.extend(body.iter().map(|line| (*line).to_string()));
        lines.push(LOG_MARKER.to_string());
        lines.join("\n") + "\n"
    }

    #[test]
    fn test_format_ends_with_marker() {
        assert!(LOG_FORMAT.ends_with(LOG_MARKER));
        assert_eq!(LOG_FORMAT.matches("%n").count(), FIELDS.len() + 1);
    }

    #[test]
    fn test_parse_single_block() {
        let text = block(
            "aaa",
            "HEAD -> main, tag: v1.0.0, origin/main",
            "bbb ccc",
            "Add feature",
            &["", "Body line\r", ""],
        );
        let commits = parse_log(&text, Versioning::SemVer).unwrap();
        assert_eq!(commits.len(), 1);

        let commit = &commits[0];
        assert_eq!(commit.hash, "aaa");
        assert_eq!(commit.author.name, "Ada");
        assert_eq!(commit.author.date.timestamp(), 1_700_000_000);
        assert_eq!(commit.committer.email, "bob@example.com");
        assert_eq!(commit.committer.date.timestamp(), 1_700_000_100);
        assert_eq!(commit.tag, "v1.0.0");
        assert_eq!(commit.parent_hashes, vec!["bbb", "ccc"]);
        assert_eq!(commit.subject, "Add feature");
        assert_eq!(commit.body, vec!["Body line"]);
    }

    #[test]
    fn test_parse_multiple_blocks() {
        let text = block("aaa", "", "bbb", "Fix bug", &[]) + &block("bbb", "", "", "Initial", &[]);
        let commits = parse_log(&text, Versioning::SemVer).unwrap();
        let hashes: Vec<_> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["aaa", "bbb"]);
        assert!(commits[1].parent_hashes.is_empty());
        assert!(commits[1].body.is_empty());
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_log("", Versioning::SemVer).unwrap().is_empty());
        assert!(parse_log("\n\n", Versioning::SemVer).unwrap().is_empty());
    }

    #[test]
    fn test_non_version_tag_is_ignored() {
        let text = block("aaa", "tag: dummy", "", "Add thing", &[]);
        let commits = parse_log(&text, Versioning::SemVer).unwrap();
        assert!(commits[0].tag.is_empty());
    }

    #[test]
    fn test_first_valid_tag_wins() {
        let text = block("aaa", "tag: nightly, tag: 1.2.0, tag: 1.3.0", "", "Add", &[]);
        let commits = parse_log(&text, Versioning::SemVer).unwrap();
        assert_eq!(commits[0].tag, "1.2.0");
    }

    #[test]
    fn test_tag_depends_on_scheme() {
        let text = block("aaa", "tag: 1.0rc1", "", "Add", &[]);
        assert!(parse_log(&text, Versioning::SemVer).unwrap()[0].tag.is_empty());
        assert_eq!(parse_log(&text, Versioning::Pep440).unwrap()[0].tag, "1.0rc1");
    }

    #[test]
    fn test_empty_date_defaults_to_now() {
        let before = Utc::now();
        let lines = ["aaa", "Ada", "a@x", "", "Bob", "b@x", "", "", "", "Subject"];
        let commit = CommitRecord::from_block(&lines, Versioning::SemVer).unwrap();
        assert!(commit.author.date >= before);
        assert!(commit.committer.date >= before);
    }

    #[test]
    fn test_invalid_date_fails() {
        let lines = ["aaa", "Ada", "a@x", "yesterday", "Bob", "b@x", "1", "", "", "Subject"];
        let err = CommitRecord::from_block(&lines, Versioning::SemVer).unwrap_err();
        assert_eq!(
            err,
            CommitError::InvalidDate {
                field: "author date",
                value: "yesterday".to_string(),
            }
        );
    }

    #[test]
    fn test_truncated_block() {
        let lines = ["aaa", "Ada", "a@x"];
        let err = CommitRecord::from_block(&lines, Versioning::SemVer).unwrap_err();
        assert_eq!(
            err,
            CommitError::TruncatedBlock {
                hash: "aaa".to_string(),
                missing: "author date",
            }
        );
    }

    #[test]
    fn test_missing_marker() {
        let text = "aaa\nAda\na@x\n1\nBob\nb@x\n1\n\n\nSubject\n";
        let err = parse_log(text, Versioning::SemVer).unwrap_err();
        assert!(matches!(err, CommitError::TruncatedBlock { missing: "end marker", .. }));
    }
}
