//! Octocrab-backed gateway for the four repository resources.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use crate::github::classify::{TransportFailure, classify};
use crate::github::error::RepoDataError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{
    ApiContributor, ApiIssue, ApiPullRequest, ApiRepository, Contributor, Issue, PullRequest,
    RepositoryStats,
};

use super::client::{ClientConfig, build_octocrab_client};
use super::error_mapping::map_octocrab_error;
use super::http_utils::{decode_body, request_uri};
use super::{
    CONTRIBUTORS_PER_PAGE, ISSUES_PER_PAGE, PULL_REQUESTS_PER_PAGE, RepositoryDataGateway,
};


/// Success response read from GitHub.
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// Octocrab-backed repository data gateway.
///
/// Requests go through Octocrab's raw interface so the status, rate-limit
/// headers and body of a failed response reach the classifier intact.
pub struct OctocrabRepositoryDataGateway {
    client: Octocrab,
}

impl OctocrabRepositoryDataGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds a gateway from explicit client configuration.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `RepoDataError::Configuration` when the base URI cannot be
    /// parsed or Octocrab fails to construct a client.
    pub fn from_config(config: &ClientConfig) -> Result<Self, RepoDataError> {
        build_octocrab_client(config).map(Self::new)
    }

    async fn send(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RawResponse, TransportFailure> {
        let uri = request_uri(path, query)?;
        tracing::debug!("{operation}: GET {uri}");

        let response = self
            .client
            ._get_with_headers(uri, None)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        let headers = response.headers().clone();
        tracing::debug!("{operation}: GitHub responded {status}");

        if status.is_success() {
            let body = self
                .client
                .body_to_string(response)
                .await
                .map_err(|error| TransportFailure::Unknown {
                    message: format!("{operation} response decode failed: {error}"),
                })?;
            return Ok(RawResponse { status, body });
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .unwrap_or_default();

        Err(TransportFailure::Http {
            status,
            headers,
            body,
        })
    }

    async fn fetch_one<Api: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> Result<Api, RepoDataError> {
        let result = match self.send(operation, path, &[]).await {
            Ok(response) => decode_body::<Api>(operation, &response.body),
            Err(failure) => Err(failure),
        };
        result.map_err(|failure| classify_failure(operation, &failure))
    }

    /// Fetches a list, treating `204 No Content` as an empty page.
    async fn fetch_list<Api: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Api>, RepoDataError> {
        let result = match self.send(operation, path, query).await {
            Ok(response) if response.status == StatusCode::NO_CONTENT => Ok(Vec::new()),
            Ok(response) => decode_body::<Vec<Api>>(operation, &response.body),
            Err(failure) => Err(failure),
        };
        result.map_err(|failure| classify_failure(operation, &failure))
    }
}

fn classify_failure(operation: &str, failure: &TransportFailure) -> RepoDataError {
    let error = classify(failure);
    tracing::debug!("{operation} failed: {failure:?} classified as {error:?}");
    error
}

#[async_trait]
impl RepositoryDataGateway for OctocrabRepositoryDataGateway {
    async fn repository_stats(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryStats, RepoDataError> {
        self.fetch_one::<ApiRepository>("repository stats", &locator.repository_path())
            .await
            .map(RepositoryStats::from)
    }

    async fn contributors(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<Contributor>, RepoDataError> {
        let per_page = CONTRIBUTORS_PER_PAGE.to_string();
        let items = self
            .fetch_list::<ApiContributor>(
                "contributors",
                &locator.contributors_path(),
                &[("per_page", per_page.as_str())],
            )
            .await?;
        Ok(items.into_iter().map(Contributor::from).collect())
    }

    async fn issues(&self, locator: &RepositoryLocator) -> Result<Vec<Issue>, RepoDataError> {
        let per_page = ISSUES_PER_PAGE.to_string();
        let items = self
            .fetch_list::<ApiIssue>(
                "issues",
                &locator.issues_path(),
                &[("state", "all"), ("per_page", per_page.as_str())],
            )
            .await?;
        Ok(items.into_iter().map(Issue::from).collect())
    }

    async fn pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequest>, RepoDataError> {
        let per_page = PULL_REQUESTS_PER_PAGE.to_string();
        let items = self
            .fetch_list::<ApiPullRequest>(
                "pull requests",
                &locator.pulls_path(),
                &[("state", "all"), ("per_page", per_page.as_str())],
            )
            .await?;
        Ok(items.into_iter().map(PullRequest::from).collect())
    }
}
