//! Error types exposed by the repository data layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Fallback text used when a failure carries no message of its own.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Errors surfaced while normalizing input or fetching repository data.
///
/// Every variant except [`RepoDataError::Configuration`] and
/// [`RepoDataError::Io`] is produced by [`crate::github::classify`] or the
/// identifier normalizer, so each fetch failure maps onto one stable,
/// user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoDataError {
    /// Owner or repository name was empty after normalization.
    #[error("Repository owner or name is missing")]
    InvalidIdentifier,

    /// GitHub answered 404 for the repository or one of its resources.
    #[error("Repository not found. Please check the owner and repo name.")]
    NotFound,

    /// GitHub answered 403 and reported an exhausted rate-limit quota.
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited {
        /// Rate limit headers captured from the rejected response.
        rate_limit: Option<RateLimitInfo>,
    },

    /// GitHub answered 403 for a reason other than rate limiting.
    #[error("Access forbidden. This repository may be private.")]
    Forbidden,

    /// GitHub answered 401.
    #[error("Authentication failed. Please check your GitHub token.")]
    Unauthorized,

    /// GitHub returned another error status together with a message.
    #[error("GitHub API error: {0}")]
    UpstreamMessage(String),

    /// GitHub returned another error status without a usable message.
    #[error("GitHub API error ({0})")]
    UpstreamStatus(u16),

    /// The request never produced a response.
    #[error("No response received from GitHub. Please check your internet connection.")]
    NoResponse,

    /// Any other failure, carrying its own description.
    #[error("{0}")]
    Unknown(String),

    /// Configuration could not be loaded or the client could not be built.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl RepoDataError {
    /// Returns true when the failure came from the upstream quota running out.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
