//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach. The library itself never
//! reads the environment; the binary loads this struct once and converts it
//! into an explicit [`ClientConfig`].
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.repolens.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REPOLENS_OWNER`, `REPOLENS_TOKEN`, or
//!    `GITHUB_TOKEN` as a token fallback
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`, and
//!    `--token`/`-t`
//!
//! # Configuration File
//!
//! ```toml
//! owner = "octocat"
//! repo = "Hello-World"
//! token = "ghp_example"
//! api_base = "https://ghe.example.com/api/v3"
//! timeout_seconds = 10
//! json = false
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::RepoDataError;
use crate::github::gateway::{ClientConfig, DEFAULT_API_BASE};
use crate::github::locator::PersonalAccessToken;

/// Environment variable consulted when no token is configured.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use repolens::RepolensConfig;
///
/// let config = RepolensConfig::load().expect("failed to load configuration");
/// let (owner, repo) = config
///     .require_repository_info()
///     .expect("repo required");
/// let client = config.client_config().expect("client configuration");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REPOLENS",
    discovery(
        dotfile_name = ".repolens.toml",
        config_file_name = "repolens.toml",
        app_name = "repolens"
    )
)]
pub struct RepolensConfig {
    /// Repository owner, or a full repository URL.
    ///
    /// Optional when `repo` is a URL or `owner/name` path.
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `REPOLENS_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name; `owner/name`, `name.git` and URLs are accepted.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `REPOLENS_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REPOLENS_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API base URL; defaults to the public API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>`
    /// - Environment: `REPOLENS_API_BASE`
    /// - Config file: `api_base = "..."`
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Connect and read timeout for each request, in seconds.
    ///
    /// Unset means no client-side timeout.
    #[ortho_config()]
    pub timeout_seconds: Option<u64>,

    /// Prints the bundle and insights as JSON instead of text.
    ///
    /// Can be provided via:
    /// - CLI: `--json`
    /// - Config file: `json = true`
    ///
    /// Note: `REPOLENS_JSON` is not supported because `ortho_config` does
    /// not load boolean values from the environment.
    #[ortho_config()]
    pub json: bool,
}

impl RepolensConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Blank values count as absent in both sources. Returns `None` when
    /// neither provides a value; requests are then sent unauthenticated.
    #[must_use]
    pub fn resolve_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| {
                env::var(GITHUB_TOKEN_ENV)
                    .ok()
                    .filter(|token| !token.trim().is_empty())
            })
    }

    /// Returns the owner and repo identifiers to normalize.
    ///
    /// A missing owner is returned as `""` so an owner embedded in a repo URL
    /// or `owner/repo` path can fill it in during normalization.
    ///
    /// # Errors
    ///
    /// Returns [`RepoDataError::Configuration`] when `repo` is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), RepoDataError> {
        let repo = self.repo.as_deref().ok_or_else(|| missing_field("repo"))?;
        Ok((self.owner.as_deref().unwrap_or_default(), repo))
    }

    /// Builds the explicit client configuration handed to the gateway.
    ///
    /// # Errors
    ///
    /// Returns [`RepoDataError::Configuration`] when `api_base` is not a
    /// valid URL.
    pub fn client_config(&self) -> Result<ClientConfig, RepoDataError> {
        let api_base = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        let token = self.resolve_token().and_then(PersonalAccessToken::new);
        let timeout = self.timeout_seconds.map(Duration::from_secs);
        Ok(ClientConfig::parse(api_base)?
            .with_token(token)
            .with_timeout(timeout))
    }
}

fn missing_field(field: &str) -> RepoDataError {
    RepoDataError::Configuration {
        message: format!("--{field} is required"),
    }
}

#[cfg(test)]
mod tests;
