//! Identifier normalization and identity wrappers for repository requests.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

use super::error::RepoDataError;

/// Bytes escaped in a path segment: everything except RFC 3986 unreserved.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, RepoDataError> {
        if value.is_empty() {
            return Err(RepoDataError::InvalidIdentifier);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, RepoDataError> {
        if value.is_empty() {
            return Err(RepoDataError::InvalidIdentifier);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Trims whitespace and rejects blank tokens.
    ///
    /// Returns `None` when the supplied string is blank, so an empty
    /// environment variable behaves like an absent credential.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(<redacted>)")
    }
}

/// Normalized owner/repository pair used to build every request path.
///
/// The only way to obtain a locator is through [`RepositoryLocator::normalize`]
/// (or the strict [`RepositoryLocator::from_owner_repo`]), so a raw,
/// unnormalized identifier never reaches the wire.
///
/// # Example
///
/// ```
/// use repolens::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::normalize(" octocat ", "Hello-World.git/")
///     .expect("identifiers should normalize");
/// assert_eq!(locator.owner().as_str(), "octocat");
/// assert_eq!(locator.repository().as_str(), "Hello-World");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator from already clean owner and repository strings.
    ///
    /// # Errors
    ///
    /// Returns `RepoDataError::InvalidIdentifier` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, RepoDataError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repo)?,
        })
    }

    /// Normalizes raw user input into a locator.
    ///
    /// Both components are trimmed and lose trailing slashes and a trailing
    /// `.git`. A component holding a URL
    /// (`https://github.com/owner/repo.git/`) or an `owner/repo` path is
    /// reduced to its repository segment, and its owner segment fills in an
    /// empty `owner` argument. An explicit non-empty owner always wins.
    ///
    /// # Errors
    ///
    /// Returns `RepoDataError::InvalidIdentifier` when either component is
    /// empty after normalization.
    pub fn normalize(owner: &str, repo: &str) -> Result<Self, RepoDataError> {
        let (owner_hint, repository) = split_identifier(repo);
        let (owner_prefix, owner_name) = split_identifier(owner);
        let explicit_owner = owner_prefix.unwrap_or(owner_name);

        let resolved_owner = if explicit_owner.is_empty() {
            owner_hint.unwrap_or_default()
        } else {
            explicit_owner
        };

        Self::from_owner_repo(&resolved_owner, strip_git_suffix(&repository))
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/repo` form used in log lines and summaries.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }

    /// Each identifier is percent-encoded as a single path segment, so
    /// reserved characters never change which resource is requested.
    pub(crate) fn repository_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            utf8_percent_encode(self.owner.as_str(), PATH_SEGMENT),
            utf8_percent_encode(self.repository.as_str(), PATH_SEGMENT)
        )
    }

    pub(crate) fn contributors_path(&self) -> String {
        format!("{}/contributors", self.repository_path())
    }

    pub(crate) fn issues_path(&self) -> String {
        format!("{}/issues", self.repository_path())
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!("{}/pulls", self.repository_path())
    }
}

/// Strips whitespace, trailing slashes and a `.git` suffix in that order,
/// then any slashes the suffix was hiding.
fn strip_git_suffix(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
}

/// Splits a raw component into an optional owner segment and a name.
///
/// URLs contribute their first two path segments (GitHub's
/// `/<owner>/<repo>/...` layout); plain paths contribute their last two.
fn split_identifier(raw: &str) -> (Option<String>, String) {
    let cleaned = strip_git_suffix(raw);

    if cleaned.contains("://")
        && let Ok(parsed) = Url::parse(cleaned)
    {
        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|parts| parts.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();
        return match segments.as_slice() {
            [] => (None, String::new()),
            [only] => (None, decode_segment(only)),
            [owner, repository, ..] => (Some(decode_segment(owner)), decode_segment(repository)),
        };
    }

    let mut segments = cleaned.rsplit('/').filter(|part| !part.is_empty());
    let name = segments.next().unwrap_or_default().trim().to_owned();
    let owner = segments.next().map(|part| part.trim().to_owned());
    (owner, name)
}

/// URL path segments arrive escaped; identifiers are stored decoded and
/// escaped again when the request path is built.
fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
