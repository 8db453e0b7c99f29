//! End-to-end resolution of parsed logs into changelogs.

use std::fmt::Write;

use chrono::NaiveDate;
use tagwalk_commit::{LOG_MARKER, parse_log};
use tagwalk_core::{Changelog, Convention, Release, UNRELEASED_VERSION};
use tagwalk_version::Versioning;

/// One log block: hash letter, refs, parent letters, subject, body.
type Entry<'a> = (char, &'a str, &'a str, &'a str, &'a [&'a str]);

fn hash(letter: char) -> String {
    letter.to_string().repeat(8)
}

fn log(entries: &[Entry<'_>]) -> String {
    let mut text = String::new();
    for (letter, refs, parents, subject, body) in entries {
        let parents: Vec<String> = parents.chars().map(hash).collect();
        writeln!(text, "{}", hash(*letter)).unwrap();
        writeln!(text, "Ada\nada@example.com\n1700000000").unwrap();
        writeln!(text, "Bob\nbob@example.com\n1700000000").unwrap();
        writeln!(text, "{refs}\n{}\n{subject}", parents.join(" ")).unwrap();
        for line in *body {
            writeln!(text, "{line}").unwrap();
        }
        writeln!(text, "{LOG_MARKER}").unwrap();
    }
    text
}

fn changelog(entries: &[Entry<'_>], convention: &str, bump: Option<&str>) -> Changelog {
    let commits = parse_log(&log(entries), Versioning::SemVer).unwrap();
    Changelog::builder()
        .today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .bump(bump)
        .build(commits, &Convention::from_name(convention).unwrap())
        .unwrap()
}

fn members(changelog: &Changelog, tag: &str) -> Vec<String> {
    let release = changelog.release(tag).unwrap();
    changelog
        .members(release)
        .map(|c| c.short_hash()[..1].to_string())
        .collect()
}

fn previous_tag<'a>(changelog: &'a Changelog, tag: &str) -> Option<&'a str> {
    changelog
        .previous(changelog.release(tag).unwrap())
        .map(Release::tag)
}

fn assert_invariants(changelog: &Changelog) {
    let mut seen = vec![0; changelog.commits().len()];
    for (position, release) in changelog.releases().iter().enumerate() {
        for &i in release.commits() {
            seen[i] += 1;
            let expected = if release.is_unreleased() {
                UNRELEASED_VERSION
            } else {
                release.tag()
            };
            assert_eq!(changelog.commits()[i].version(), expected);
        }

        if !release.is_unreleased() {
            let anchor = &changelog.commits()[release.commits()[0]];
            assert_eq!(anchor.tag, release.tag());
        }

        if let Some(previous) = release.previous() {
            assert_eq!(changelog.releases()[previous].next(), Some(position));
        }
    }
    assert!(seen.iter().all(|&count| count == 1), "partition broken: {seen:?}");

    let unreleased = changelog.releases().iter().filter(|r| r.is_unreleased());
    assert!(unreleased.count() <= 1);
}

fn summary(changelog: &Changelog) -> String {
    let mut out = String::new();
    for release in changelog.releases() {
        let title = if release.is_unreleased() {
            format!("Unreleased ({})", release.planned_tag().unwrap_or("-"))
        } else {
            release.tag().to_string()
        };
        writeln!(
            out,
            "## {title} - {} (since {})",
            release.date(),
            release.compare_base()
        )
        .unwrap();

        let untyped = release.untyped_section().map(|s| ("Misc", s));
        let sections = release.typed_sections().map(|s| (s.title(), s));
        for (title, section) in sections.chain(untyped) {
            writeln!(out, "### {title}").unwrap();
            for commit in changelog.section_commits(section) {
                writeln!(
                    out,
                    "- {} ({})",
                    commit.classification.subject,
                    commit.short_hash()
                )
                .unwrap();
            }
        }
    }
    out
}

#[test]
fn test_diamond_merge() {
    let changelog = changelog(
        &[
            ('d', "HEAD -> main, tag: 1.0.0", "bc", "Merge branch 'feature'", &[]),
            ('c', "", "a", "Add feature", &[]),
            ('b', "", "a", "Fix bug", &[]),
            ('a', "", "", "Add init", &[]),
        ],
        "basic",
        None,
    );

    assert_eq!(changelog.releases().len(), 1);
    assert_eq!(members(&changelog, "1.0.0"), ["d", "b", "c", "a"]);
    assert_eq!(previous_tag(&changelog, "1.0.0"), None);
    assert_invariants(&changelog);
}

#[test]
fn test_two_tags_across_merge() {
    let changelog = changelog(
        &[
            ('d', "tag: 1.1.0", "bc", "Merge branch 'feature'", &[]),
            ('c', "", "b", "Add feature", &[]),
            ('b', "tag: 1.0.0", "a", "Fix bug", &[]),
            ('a', "", "", "Add init", &[]),
        ],
        "basic",
        None,
    );

    assert_eq!(members(&changelog, "1.1.0"), ["d", "c"]);
    assert_eq!(members(&changelog, "1.0.0"), ["b", "a"]);
    assert_eq!(previous_tag(&changelog, "1.1.0"), Some("1.0.0"));
    assert_eq!(
        changelog
            .next(changelog.release("1.0.0").unwrap())
            .map(Release::tag),
        Some("1.1.0")
    );
    assert_invariants(&changelog);
}

#[test]
fn test_release_branches() {
    let changelog = changelog(
        &[
            ('g', "HEAD -> main", "f", "Add g", &[]),
            ('f', "", "e", "Fix f", &[]),
            ('e', "tag: 2.0.0", "cd", "Merge branch 'release-1.1'", &[]),
            ('d', "tag: 1.1.0", "b", "Add d", &[]),
            ('c', "", "b", "Change c", &["", "Breaking change: c"]),
            ('b', "tag: 1.0.0", "a", "Fix b", &[]),
            ('a', "", "", "Add a", &[]),
        ],
        "basic",
        Some("auto"),
    );

    let tags: Vec<&str> = changelog.releases().iter().map(Release::tag).collect();
    assert_eq!(tags, ["", "2.0.0", "1.1.0", "1.0.0"]);

    assert_eq!(members(&changelog, ""), ["g", "f"]);
    assert_eq!(members(&changelog, "2.0.0"), ["e", "c"]);
    assert_eq!(members(&changelog, "1.1.0"), ["d"]);
    assert_eq!(members(&changelog, "1.0.0"), ["b", "a"]);

    assert_eq!(previous_tag(&changelog, ""), Some("2.0.0"));
    assert_eq!(previous_tag(&changelog, "2.0.0"), Some("1.1.0"));
    assert_eq!(previous_tag(&changelog, "1.1.0"), Some("1.0.0"));
    assert_eq!(previous_tag(&changelog, "1.0.0"), None);

    assert_eq!(changelog.releases()[0].planned_tag(), Some("2.1.0"));
    assert!(changelog.release("2.0.0").unwrap().is_major());
    assert!(changelog.release("1.1.0").unwrap().is_minor());
    assert_invariants(&changelog);
}

#[test]
fn test_non_version_tags_ignored() {
    let changelog = changelog(
        &[
            ('c', "tag: 1.0.0", "b", "Fix c", &[]),
            ('b', "tag: dummy", "a", "Fix b", &[]),
            ('a', "tag: nightly, tag: 0.1.0", "", "Add a", &[]),
        ],
        "basic",
        None,
    );

    let tags: Vec<&str> = changelog.releases().iter().map(Release::tag).collect();
    assert_eq!(tags, ["1.0.0", "0.1.0"]);
    assert_eq!(members(&changelog, "1.0.0"), ["c", "b"]);
    assert_invariants(&changelog);
}

#[test]
fn test_shallow_history() {
    let changelog = changelog(
        &[
            ('c', "", "b", "Add c", &[]),
            ('b', "tag: v0.2.0", "z", "Fix b", &[]),
        ],
        "basic",
        Some("auto"),
    );

    assert_eq!(members(&changelog, "v0.2.0"), ["b"]);
    assert_eq!(changelog.release("v0.2.0").unwrap().compare_base(), hash('b'));
    assert_eq!(changelog.releases()[0].planned_tag(), Some("v0.3.0"));
    assert_invariants(&changelog);
}

#[test]
fn test_pep440_history() {
    let commits = parse_log(
        &log(&[
            ('c', "HEAD -> main", "b", "feat: add c", &[]),
            ('b', "tag: 1.0", "a", "fix: b", &[]),
            ('a', "tag: 1.0rc1", "", "feat: a", &[]),
        ]),
        Versioning::Pep440,
    )
    .unwrap();
    let changelog = Changelog::builder()
        .versioning(Versioning::Pep440)
        .bump(Some("auto+dev"))
        .build(commits, &Convention::from_name("angular").unwrap())
        .unwrap();

    assert_eq!(previous_tag(&changelog, ""), Some("1.0"));
    assert_eq!(previous_tag(&changelog, "1.0"), Some("1.0rc1"));
    assert_eq!(changelog.releases()[0].planned_tag(), Some("1.1.dev0"));
    assert_invariants(&changelog);
}

#[test]
fn test_summary() {
    let changelog = changelog(
        &[
            ('g', "HEAD -> main", "f", "feat(cli): add --json flag", &[]),
            ('f', "", "e", "fix: handle empty log", &[]),
            ('e', "tag: v2.0.0", "cd", "Merge branch 'hotfix'", &[]),
            ('d', "tag: v1.0.1", "b", "fix(parser): reject bad dates", &[]),
            ('c', "", "b", "feat(api)!: rename endpoints", &[]),
            ('b', "tag: v1.0.0", "a", "feat: first release", &[]),
            ('a', "", "", "chore: initial commit", &[]),
        ],
        "conventional",
        Some("auto"),
    );

    assert_invariants(&changelog);
    insta::assert_snapshot!(summary(&changelog).trim_end(), @r"
    ## Unreleased (v2.1.0) - 2024-06-01 (since v2.0.0)
    ### Features
    - add --json flag (ggggggg)
    ### Bug Fixes
    - handle empty log (fffffff)
    ## v2.0.0 - 2023-11-14 (since v1.0.1)
    ### Features
    - rename endpoints (ccccccc)
    ### Misc
    - Merge branch 'hotfix' (eeeeeee)
    ## v1.0.1 - 2023-11-14 (since v1.0.0)
    ### Bug Fixes
    - reject bad dates (ddddddd)
    ## v1.0.0 - 2023-11-14 (since aaaaaaaa)
    ### Features
    - first release (bbbbbbb)
    ### Chore
    - initial commit (aaaaaaa)
    ");
}
