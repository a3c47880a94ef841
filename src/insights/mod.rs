//! Derived metrics over an aggregated repository bundle.
//!
//! Everything here is a pure function of a [`RepoDataBundle`]; no requests
//! are made. Unavailable optional resources contribute no items and are
//! listed in [`RepositoryInsights::unavailable`] so readers can tell a quiet
//! repository from a partial load.

use std::cmp::Reverse;
use std::fmt;

use chrono::TimeDelta;
use serde::Serialize;

use crate::github::{Contributor, Issue, IssueState, PullRequest, RepoDataBundle};

/// Number of contributors reported as the most active.
pub const TOP_CONTRIBUTOR_COUNT: usize = 5;

const MINUTES_PER_DAY: f64 = 1440.0;
const PULL_REQUEST_WEIGHT: f64 = 30.0;
const PULL_REQUEST_INTERVAL_SCALE_DAYS: f64 = 10.0;
const ISSUE_WEIGHT: f64 = 30.0;
const ISSUE_RESOLUTION_SCALE_DAYS: f64 = 30.0;
const CONTRIBUTOR_WEIGHT: f64 = 20.0;
const CONTRIBUTOR_SCALE: f64 = 10.0;
const STAR_WEIGHT: f64 = 20.0;
const STAR_LOG_FACTOR: f64 = 10.0;

/// Optional resource that could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableResource {
    /// The issue listing failed.
    Issues,
    /// The pull request listing failed.
    PullRequests,
}

impl fmt::Display for UnavailableResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issues => f.write_str("issues"),
            Self::PullRequests => f.write_str("pull requests"),
        }
    }
}

/// Summary metrics for one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInsights {
    /// Up to five contributors with the most contributions.
    pub top_contributors: Vec<Contributor>,
    /// Issues in the open state.
    pub open_issues: usize,
    /// Issues with a close timestamp.
    pub closed_issues: usize,
    /// Pull requests in the open state.
    pub open_pull_requests: usize,
    /// Pull requests in the closed state.
    pub closed_pull_requests: usize,
    /// Mean days from opening to closing over closed issues.
    pub average_resolution_days: Option<f64>,
    /// Mean days between consecutive merges.
    pub merge_interval_days: Option<f64>,
    /// Composite score between 0 and 100.
    pub health_score: u8,
    /// Optional resources missing from the bundle.
    pub unavailable: Vec<UnavailableResource>,
}

impl RepositoryInsights {
    /// Computes every metric for the bundle.
    ///
    /// # Examples
    ///
    /// ```
    /// use repolens::github::models::test_support::{bundle, sample_stats};
    /// use repolens::insights::RepositoryInsights;
    ///
    /// let empty = bundle(sample_stats(1000), vec![], vec![], vec![]);
    /// let insights = RepositoryInsights::from_bundle(&empty);
    /// assert_eq!(insights.health_score, 0);
    /// assert!(insights.top_contributors.is_empty());
    /// ```
    #[must_use]
    pub fn from_bundle(bundle: &RepoDataBundle) -> Self {
        let issues = bundle.issues.items();
        let pull_requests = bundle.pull_requests.items();

        let mut unavailable = Vec::new();
        if !bundle.issues.is_available() {
            unavailable.push(UnavailableResource::Issues);
        }
        if !bundle.pull_requests.is_available() {
            unavailable.push(UnavailableResource::PullRequests);
        }

        if bundle.contributors.is_empty() && issues.is_empty() && pull_requests.is_empty() {
            return Self::empty(unavailable);
        }

        let average_resolution_days = average_resolution_days(issues);
        let merge_interval_days = merge_interval_days(pull_requests);

        Self {
            top_contributors: top_contributors(&bundle.contributors),
            open_issues: issues
                .iter()
                .filter(|issue| issue.state == IssueState::Open)
                .count(),
            closed_issues: issues.iter().filter(|i| i.closed_at.is_some()).count(),
            open_pull_requests: count_state(pull_requests, IssueState::Open),
            closed_pull_requests: count_state(pull_requests, IssueState::Closed),
            average_resolution_days,
            merge_interval_days,
            health_score: health_score(&HealthInputs {
                merge_interval_days,
                average_resolution_days,
                contributor_count: bundle.contributors.len(),
                stargazers_count: bundle.stats.stargazers_count,
            }),
            unavailable,
        }
    }

    /// A repository with no activity scores nothing, whatever its stars.
    const fn empty(unavailable: Vec<UnavailableResource>) -> Self {
        Self {
            top_contributors: Vec::new(),
            open_issues: 0,
            closed_issues: 0,
            open_pull_requests: 0,
            closed_pull_requests: 0,
            average_resolution_days: None,
            merge_interval_days: None,
            health_score: 0,
            unavailable,
        }
    }
}

/// Inputs to [`health_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthInputs {
    /// Mean days between merges, if known.
    pub merge_interval_days: Option<f64>,
    /// Mean issue resolution days, if known.
    pub average_resolution_days: Option<f64>,
    /// Number of contributors on the first page.
    pub contributor_count: usize,
    /// Repository star count.
    pub stargazers_count: u64,
}

/// Returns up to five contributors ordered by contributions, descending.
///
/// Ties keep their input order.
#[must_use]
pub fn top_contributors(contributors: &[Contributor]) -> Vec<Contributor> {
    let mut ranked = contributors.to_vec();
    ranked.sort_by_key(|contributor| Reverse(contributor.contributions));
    ranked.truncate(TOP_CONTRIBUTOR_COUNT);
    ranked
}

fn count_state(pull_requests: &[PullRequest], state: IssueState) -> usize {
    pull_requests.iter().filter(|pr| pr.state == state).count()
}

/// Mean days between opening and closing, over issues with a close time.
#[must_use]
pub fn average_resolution_days(issues: &[Issue]) -> Option<f64> {
    let durations: Vec<TimeDelta> = issues
        .iter()
        .filter_map(|issue| issue.closed_at.map(|closed| closed - issue.created_at))
        .collect();
    let count = durations.len();
    let total = durations
        .into_iter()
        .fold(TimeDelta::zero(), |acc, delta| acc + delta);
    mean_days(total, count)
}

/// Mean days between consecutive merges, ordered by merge time.
///
/// Returns `None` when fewer than two pull requests were merged.
#[must_use]
pub fn merge_interval_days(pull_requests: &[PullRequest]) -> Option<f64> {
    let mut merged: Vec<_> = pull_requests.iter().filter_map(|pr| pr.merged_at).collect();
    merged.sort_unstable();
    let (first, last) = (merged.first()?, merged.last()?);
    let gaps = merged.len().checked_sub(1)?;
    mean_days(*last - *first, gaps)
}

#[expect(
    clippy::float_arithmetic,
    reason = "durations are averaged as fractional days"
)]
fn mean_days(total: TimeDelta, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let minutes = i32::try_from(total.num_minutes()).unwrap_or(i32::MAX);
    let divisor = u32::try_from(count).unwrap_or(u32::MAX);
    Some(f64::from(minutes) / MINUTES_PER_DAY / f64::from(divisor))
}

/// Composite repository health between 0 and 100.
///
/// Merge cadence and issue resolution contribute up to 30 points each, with
/// shorter intervals scoring higher and a missing or non-positive value
/// scoring nothing. Contributor count and stars contribute up to 20 points each.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the score is a weighted sum of fractional components"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the sum is clamped to 0..=100 before conversion"
)]
pub fn health_score(inputs: &HealthInputs) -> u8 {
    let pull_request_score = inverse_score(
        inputs.merge_interval_days,
        PULL_REQUEST_INTERVAL_SCALE_DAYS,
        PULL_REQUEST_WEIGHT,
    );
    let issue_score = inverse_score(
        inputs.average_resolution_days,
        ISSUE_RESOLUTION_SCALE_DAYS,
        ISSUE_WEIGHT,
    );
    let contributors = f64::from(u32::try_from(inputs.contributor_count).unwrap_or(u32::MAX));
    let contributor_score =
        (contributors / CONTRIBUTOR_SCALE * CONTRIBUTOR_WEIGHT).min(CONTRIBUTOR_WEIGHT);
    let stars = f64::from(u32::try_from(inputs.stargazers_count).unwrap_or(u32::MAX));
    let star_score = ((stars + 1.0).log10() * STAR_LOG_FACTOR).min(STAR_WEIGHT);

    let total = pull_request_score + issue_score + contributor_score + star_score;
    total.round().clamp(0.0, 100.0) as u8
}

#[expect(
    clippy::float_arithmetic,
    reason = "scores scale linearly with the measured interval"
)]
fn inverse_score(days: Option<f64>, scale: f64, weight: f64) -> f64 {
    match days {
        Some(value) if value > 0.0 => (weight - value / scale * weight).clamp(0.0, weight),
        _ => 0.0,
    }
}
