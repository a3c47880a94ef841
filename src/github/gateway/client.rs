//! Client configuration and Octocrab construction.

use std::time::Duration;

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use url::Url;

use crate::github::error::RepoDataError;
use crate::github::locator::PersonalAccessToken;

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Explicit settings a gateway owns for its lifetime.
///
/// Nothing here is read from the process environment; callers build the value
/// once at startup and hand it to the gateway.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use repolens::github::{ClientConfig, PersonalAccessToken};
///
/// let config = ClientConfig::parse("https://api.github.com")
///     .expect("base URL should parse")
///     .with_token(PersonalAccessToken::new("ghp_example"))
///     .with_timeout(Some(Duration::from_secs(10)));
/// assert!(config.token().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: Url,
    token: Option<PersonalAccessToken>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates an unauthenticated configuration without timeouts.
    #[must_use]
    pub const fn new(api_base: Url) -> Self {
        Self {
            api_base,
            token: None,
            timeout: None,
        }
    }

    /// Parses the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `RepoDataError::Configuration` when the URL is invalid.
    pub fn parse(api_base: &str) -> Result<Self, RepoDataError> {
        Url::parse(api_base.trim())
            .map(Self::new)
            .map_err(|error| RepoDataError::Configuration {
                message: format!("invalid API base URL '{api_base}': {error}"),
            })
    }

    /// Attaches an optional credential sent with every request.
    #[must_use]
    pub fn with_token(self, token: Option<PersonalAccessToken>) -> Self {
        Self { token, ..self }
    }

    /// Applies a connect and read timeout to every request.
    #[must_use]
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Credential, when configured.
    #[must_use]
    pub const fn token(&self) -> Option<&PersonalAccessToken> {
        self.token.as_ref()
    }

    /// Request timeout, when configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builds an Octocrab client for the given configuration.
///
/// Octocrab's retry layer is disabled so each fetch maps to exactly one
/// outbound request.
///
/// # Errors
///
/// Returns `RepoDataError::Configuration` when the base URI cannot be parsed
/// or Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(config: &ClientConfig) -> Result<Octocrab, RepoDataError> {
    let base_uri: Uri = config
        .api_base()
        .as_str()
        .parse::<Uri>()
        .map_err(|error| RepoDataError::Configuration {
            message: format!("invalid API base URI: {error}"),
        })?;

    let mut builder = Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| RepoDataError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(config.timeout())
        .set_read_timeout(config.timeout());

    if let Some(token) = config.token() {
        builder = builder.personal_token(token.value());
    }

    builder
        .build()
        .map_err(|error| RepoDataError::Configuration {
            message: format!("build client failed: {error}"),
        })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::ClientConfig;
    use crate::github::error::RepoDataError;
    use crate::github::locator::PersonalAccessToken;

    #[rstest]
    fn parse_rejects_invalid_base() {
        let result = ClientConfig::parse("not a url");
        assert!(
            matches!(result, Err(RepoDataError::Configuration { .. })),
            "expected Configuration error, got {result:?}"
        );
    }

    #[rstest]
    fn builder_methods_keep_other_settings() {
        let config = ClientConfig::parse(" https://ghe.example.com/api/v3 ")
            .expect("base URL should parse")
            .with_timeout(Some(Duration::from_secs(5)))
            .with_token(PersonalAccessToken::new("ghp_example"));

        assert_eq!(config.api_base().as_str(), "https://ghe.example.com/api/v3");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(
            config.token().map(PersonalAccessToken::value),
            Some("ghp_example")
        );
    }
}
