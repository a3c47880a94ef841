//! Test helpers for constructing repository data fixtures.
//!
//! These builders keep insight and output tests focused on the fields they
//! exercise. Timestamps are expressed as whole days after the Unix epoch.
//!
//! # Examples
//!
//! ```
//! use repolens::github::models::test_support::{contributor, day, sample_stats};
//!
//! let stats = sample_stats(42);
//! let alice = contributor("alice", 10);
//! assert_eq!(stats.stargazers_count, 42);
//! assert_eq!(alice.contributions, 10);
//! assert!(day(2) > day(1));
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use super::{
    Author, Contributor, Issue, IssueState, OwnerProfile, PullRequest, RepoDataBundle,
    RepositoryStats, ResourceOutcome,
};

/// Timestamp `days` whole days after the Unix epoch.
#[must_use]
pub fn day(days: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(days)
}

/// Statistics for `octocat/Hello-World` with the given star count.
#[must_use]
pub fn sample_stats(stargazers_count: u64) -> RepositoryStats {
    RepositoryStats {
        name: "Hello-World".to_owned(),
        full_name: "octocat/Hello-World".to_owned(),
        description: Some("My first repository on GitHub!".to_owned()),
        created_at: day(0),
        updated_at: day(10),
        pushed_at: Some(day(9)),
        stargazers_count,
        watchers_count: stargazers_count,
        forks_count: 3,
        open_issues_count: 1,
        language: Some("Rust".to_owned()),
        owner: OwnerProfile {
            login: "octocat".to_owned(),
            avatar_url: None,
            html_url: Some("https://github.com/octocat".to_owned()),
        },
    }
}

/// Contributor with the given login and contribution count.
#[must_use]
pub fn contributor(login: &str, contributions: u64) -> Contributor {
    Contributor {
        login: login.to_owned(),
        id: contributions,
        avatar_url: None,
        html_url: Some(format!("https://github.com/{login}")),
        contributions,
    }
}

/// Issue opened on `opened` and closed on `closed` when given.
#[must_use]
pub fn issue(number: u64, opened: i64, closed: Option<i64>) -> Issue {
    Issue {
        id: number,
        number,
        title: format!("Issue {number}"),
        state: if closed.is_some() {
            IssueState::Closed
        } else {
            IssueState::Open
        },
        created_at: day(opened),
        closed_at: closed.map(day),
        body: None,
        user: Some(Author {
            login: "reporter".to_owned(),
            avatar_url: None,
        }),
        comments: 0,
        is_pull_request: false,
    }
}

/// Pull request opened on `opened` and merged on `merged` when given.
///
/// A merged pull request is also closed on the merge day.
#[must_use]
pub fn pull_request(number: u64, opened: i64, merged: Option<i64>) -> PullRequest {
    PullRequest {
        id: number,
        number,
        title: format!("Pull request {number}"),
        state: if merged.is_some() {
            IssueState::Closed
        } else {
            IssueState::Open
        },
        created_at: day(opened),
        closed_at: merged.map(day),
        merged_at: merged.map(day),
        body: None,
        user: Some(Author {
            login: "author".to_owned(),
            avatar_url: None,
        }),
        comments: None,
        additions: None,
        deletions: None,
        changed_files: None,
    }
}

/// Bundle with every resource available.
#[must_use]
pub fn bundle(
    stats: RepositoryStats,
    contributors: Vec<Contributor>,
    issues: Vec<Issue>,
    pull_requests: Vec<PullRequest>,
) -> RepoDataBundle {
    RepoDataBundle {
        stats,
        contributors,
        issues: ResourceOutcome::Available(issues),
        pull_requests: ResourceOutcome::Available(pull_requests),
    }
}
