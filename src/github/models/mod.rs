//! Data models representing repository metadata returned by the GitHub API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into the public domain types. Domain types are plain records: they are
//! built once per fetch and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::error::RepoDataError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Open/closed state shared by issues and pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// Still open.
    Open,
    /// Closed, including merged pull requests.
    Closed,
}

impl IssueState {
    /// Returns the API value for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Account that owns a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerProfile {
    /// Account login.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub html_url: Option<String>,
}

/// Repository statistics from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    /// Short repository name.
    pub name: String,
    /// `owner/name` form.
    pub full_name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last metadata update.
    pub updated_at: DateTime<Utc>,
    /// Last push; GitHub omits it for repositories that never received one.
    pub pushed_at: Option<DateTime<Utc>>,
    /// Star count.
    pub stargazers_count: u64,
    /// Watcher count.
    pub watchers_count: u64,
    /// Fork count.
    pub forks_count: u64,
    /// Open issues, pull requests included.
    pub open_issues_count: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Owning account.
    pub owner: OwnerProfile,
}

/// Contributor entry from `GET /repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    /// Account login.
    pub login: String,
    /// Numeric account id.
    pub id: u64,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile page URL.
    pub html_url: Option<String>,
    /// Number of commits attributed to the account.
    pub contributions: u64,
}

/// Author of an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    /// Account login.
    pub login: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Issue from `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Global identifier.
    pub id: u64,
    /// Repository-local number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Open or closed.
    pub state: IssueState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Close time when closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Markdown body.
    pub body: Option<String>,
    /// Reporting user.
    pub user: Option<Author>,
    /// Comment count.
    pub comments: u64,
    /// True when GitHub returned a pull request through the issues endpoint.
    pub is_pull_request: bool,
}

/// Pull request from `GET /repos/{owner}/{repo}/pulls`.
///
/// The listing endpoint omits the comment count and code-change counters, so
/// those fields stay `None` unless the payload carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    /// Global identifier.
    pub id: u64,
    /// Repository-local number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Open or closed.
    pub state: IssueState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Close time when closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Merge time when merged; a closed pull request may be unmerged.
    pub merged_at: Option<DateTime<Utc>>,
    /// Markdown body.
    pub body: Option<String>,
    /// Opening user.
    pub user: Option<Author>,
    /// Comment count.
    pub comments: Option<u64>,
    /// Lines added.
    pub additions: Option<u64>,
    /// Lines removed.
    pub deletions: Option<u64>,
    /// Files touched.
    pub changed_files: Option<u64>,
}

/// Result of fetching an optional resource.
///
/// A failed optional fetch is kept as `Unavailable` instead of collapsing into
/// an empty list, so callers can tell "none exist" from "could not load".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOutcome<T> {
    /// The fetch succeeded.
    Available(Vec<T>),
    /// The fetch failed with the carried error.
    Unavailable(RepoDataError),
}

impl<T> ResourceOutcome<T> {
    /// Wraps a fetch result.
    #[must_use]
    pub fn from_result(result: Result<Vec<T>, RepoDataError>) -> Self {
        match result {
            Ok(items) => Self::Available(items),
            Err(error) => Self::Unavailable(error),
        }
    }

    /// Items on success, an empty slice otherwise.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Available(items) => items,
            Self::Unavailable(_) => &[],
        }
    }

    /// Returns true when the fetch succeeded.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// The failure that made the resource unavailable.
    #[must_use]
    pub const fn error(&self) -> Option<&RepoDataError> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(error) => Some(error),
        }
    }
}

impl<T: Serialize> Serialize for ResourceOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResourceOutcome", 2)?;
        match self {
            Self::Available(items) => {
                state.serialize_field("status", "available")?;
                state.serialize_field("items", items)?;
            }
            Self::Unavailable(error) => {
                state.serialize_field("status", "unavailable")?;
                state.serialize_field("error", &error.to_string())?;
            }
        }
        state.end()
    }
}

/// Everything one aggregation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoDataBundle {
    /// Repository statistics.
    pub stats: RepositoryStats,
    /// Contributors in descending contribution order.
    pub contributors: Vec<Contributor>,
    /// Issues, first page only.
    pub issues: ResourceOutcome<Issue>,
    /// Pull requests, first page only.
    pub pull_requests: ResourceOutcome<PullRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiOwner {
    pub(super) login: String,
    pub(super) avatar_url: Option<String>,
    pub(super) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) name: String,
    pub(super) full_name: String,
    pub(super) description: Option<String>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
    pub(super) pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(super) stargazers_count: u64,
    #[serde(default)]
    pub(super) watchers_count: u64,
    #[serde(default)]
    pub(super) forks_count: u64,
    #[serde(default)]
    pub(super) open_issues_count: u64,
    pub(super) language: Option<String>,
    pub(super) owner: ApiOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiContributor {
    pub(super) login: String,
    pub(super) id: u64,
    pub(super) avatar_url: Option<String>,
    pub(super) html_url: Option<String>,
    #[serde(default)]
    pub(super) contributions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: String,
    pub(super) avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) id: u64,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) state: IssueState,
    pub(super) created_at: DateTime<Utc>,
    pub(super) closed_at: Option<DateTime<Utc>>,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    #[serde(default)]
    pub(super) comments: u64,
    pub(super) pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) id: u64,
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) state: IssueState,
    pub(super) created_at: DateTime<Utc>,
    pub(super) closed_at: Option<DateTime<Utc>>,
    pub(super) merged_at: Option<DateTime<Utc>>,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) comments: Option<u64>,
    pub(super) additions: Option<u64>,
    pub(super) deletions: Option<u64>,
    pub(super) changed_files: Option<u64>,
}

impl From<ApiUser> for Author {
    fn from(value: ApiUser) -> Self {
        Self {
            login: value.login,
            avatar_url: value.avatar_url,
        }
    }
}

impl From<ApiRepository> for RepositoryStats {
    fn from(value: ApiRepository) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
            description: value.description,
            created_at: value.created_at,
            updated_at: value.updated_at,
            pushed_at: value.pushed_at,
            stargazers_count: value.stargazers_count,
            watchers_count: value.watchers_count,
            forks_count: value.forks_count,
            open_issues_count: value.open_issues_count,
            language: value.language,
            owner: OwnerProfile {
                login: value.owner.login,
                avatar_url: value.owner.avatar_url,
                html_url: value.owner.html_url,
            },
        }
    }
}

impl From<ApiContributor> for Contributor {
    fn from(value: ApiContributor) -> Self {
        Self {
            login: value.login,
            id: value.id,
            avatar_url: value.avatar_url,
            html_url: value.html_url,
            contributions: value.contributions,
        }
    }
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            state: value.state,
            created_at: value.created_at,
            closed_at: value.closed_at,
            body: value.body,
            user: value.user.map(Author::from),
            comments: value.comments,
            is_pull_request: value.pull_request.is_some(),
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            state: value.state,
            created_at: value.created_at,
            closed_at: value.closed_at,
            merged_at: value.merged_at,
            body: value.body,
            user: value.user.map(Author::from),
            comments: value.comments,
            additions: value.additions,
            deletions: value.deletions,
            changed_files: value.changed_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{
        ApiContributor, ApiIssue, ApiPullRequest, ApiRepository, Contributor, Issue, IssueState,
        PullRequest, RepositoryStats, ResourceOutcome,
    };
    use crate::github::error::RepoDataError;

    #[rstest]
    fn repository_payload_converts_into_stats() {
        let api: ApiRepository = serde_json::from_value(json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": "This your first repo!",
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z",
            "pushed_at": "2011-01-26T19:06:43Z",
            "stargazers_count": 42,
            "watchers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "language": null,
            "owner": {
                "login": "octocat",
                "avatar_url": "https://github.com/images/error/octocat_happy.gif",
                "html_url": "https://github.com/octocat"
            }
        }))
        .expect("repository payload should deserialise");

        let stats = RepositoryStats::from(api);

        assert_eq!(stats.full_name, "octocat/Hello-World");
        assert_eq!(stats.stargazers_count, 42);
        assert_eq!(stats.watchers_count, 80);
        assert_eq!(stats.language, None);
        assert_eq!(stats.owner.login, "octocat");
        assert_eq!(
            stats.pushed_at.map(|pushed| pushed.to_rfc3339()),
            Some("2011-01-26T19:06:43+00:00".to_owned())
        );
    }

    #[rstest]
    fn contributor_payload_converts() {
        let api: ApiContributor = serde_json::from_value(json!({
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "html_url": "https://github.com/octocat",
            "type": "User",
            "contributions": 32
        }))
        .expect("contributor payload should deserialise");

        let contributor = Contributor::from(api);

        assert_eq!(contributor.login, "octocat");
        assert_eq!(contributor.contributions, 32);
    }

    #[rstest]
    #[case::plain_issue(json!(null), false)]
    #[case::pull_request_entry(json!({ "url": "https://api.github.com/repos/o/r/pulls/2" }), true)]
    fn issue_payload_marks_pull_requests(
        #[case] pull_request: serde_json::Value,
        #[case] expected: bool,
    ) {
        let api: ApiIssue = serde_json::from_value(json!({
            "id": 10,
            "number": 2,
            "title": "Found a bug",
            "state": "closed",
            "created_at": "2024-01-01T00:00:00Z",
            "closed_at": "2024-01-03T00:00:00Z",
            "body": null,
            "user": { "login": "reporter", "avatar_url": null },
            "comments": 4,
            "pull_request": pull_request
        }))
        .expect("issue payload should deserialise");

        let issue = Issue::from(api);

        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.comments, 4);
        assert!(issue.closed_at.is_some());
        assert_eq!(issue.is_pull_request, expected);
    }

    #[rstest]
    fn pull_request_listing_payload_leaves_counters_empty() {
        let api: ApiPullRequest = serde_json::from_value(json!({
            "id": 20,
            "number": 7,
            "title": "Add feature",
            "state": "closed",
            "created_at": "2024-02-01T00:00:00Z",
            "closed_at": "2024-02-02T00:00:00Z",
            "merged_at": "2024-02-02T00:00:00Z",
            "body": "Adds the feature",
            "user": { "login": "author" }
        }))
        .expect("pull request payload should deserialise");

        let pull_request = PullRequest::from(api);

        assert!(pull_request.merged_at.is_some());
        assert_eq!(pull_request.additions, None);
        assert_eq!(pull_request.changed_files, None);
        assert_eq!(
            pull_request.user.map(|user| user.login).as_deref(),
            Some("author")
        );
    }

    #[rstest]
    fn unavailable_outcome_exposes_no_items() {
        let outcome: ResourceOutcome<Issue> = ResourceOutcome::from_result(Err(RepoDataError::NoResponse));

        assert!(outcome.items().is_empty());
        assert!(!outcome.is_available());
        assert_eq!(outcome.error(), Some(&RepoDataError::NoResponse));
    }

    #[rstest]
    fn outcomes_serialise_with_status_tag() {
        let available: ResourceOutcome<u8> = ResourceOutcome::Available(vec![1, 2]);
        let unavailable: ResourceOutcome<u8> = ResourceOutcome::Unavailable(RepoDataError::NotFound);

        assert_eq!(
            serde_json::to_value(&available).expect("outcome should serialise"),
            json!({ "status": "available", "items": [1, 2] })
        );
        assert_eq!(
            serde_json::to_value(&unavailable).expect("outcome should serialise"),
            json!({
                "status": "unavailable",
                "error": "Repository not found. Please check the owner and repo name."
            })
        );
    }
}
