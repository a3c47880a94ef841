//! Aggregation of the four repository resources into one bundle.

use std::cmp::Reverse;

use super::error::RepoDataError;
use super::gateway::RepositoryDataGateway;
use super::locator::RepositoryLocator;
use super::models::{RepoDataBundle, ResourceOutcome};

/// Loads a repository's statistics, contributors, issues and pull requests.
///
/// Statistics and contributors are mandatory: the first failure among them
/// aborts the load and no further requests are made. Issues and pull
/// requests are optional: their failures are logged and recorded as
/// [`ResourceOutcome::Unavailable`] so the bundle is still returned.
///
/// Requests are issued sequentially in a fixed order (statistics,
/// contributors, issues, pull requests) to keep the unauthenticated rate
/// budget predictable.
pub struct RepositoryAggregator<'client, Gateway>
where
    Gateway: RepositoryDataGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> RepositoryAggregator<'client, Gateway>
where
    Gateway: RepositoryDataGateway,
{
    /// Create a new aggregator using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Normalise the identifier pair and load the bundle.
    ///
    /// # Errors
    ///
    /// Returns [`RepoDataError::InvalidIdentifier`] without contacting the
    /// gateway when either component is empty after normalisation, otherwise
    /// see [`Self::load_locator`].
    pub async fn load(&self, owner: &str, repo: &str) -> Result<RepoDataBundle, RepoDataError> {
        let locator = RepositoryLocator::normalize(owner, repo)?;
        self.load_locator(&locator).await
    }

    /// Load the bundle for an already normalised repository.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the statistics or contributors fetch,
    /// whichever fails first.
    pub async fn load_locator(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<RepoDataBundle, RepoDataError> {
        let stats = self.client.repository_stats(locator).await?;

        let mut contributors = self.client.contributors(locator).await?;
        contributors.sort_by_key(|contributor| Reverse(contributor.contributions));

        let issues = ResourceOutcome::from_result(self.client.issues(locator).await);
        if let Some(error) = issues.error() {
            tracing::warn!("issues unavailable for {}: {error}", locator.full_name());
        }

        let pull_requests = ResourceOutcome::from_result(self.client.pull_requests(locator).await);
        if let Some(error) = pull_requests.error() {
            tracing::warn!(
                "pull requests unavailable for {}: {error}",
                locator.full_name()
            );
        }

        tracing::info!(
            "loaded {}: {} contributors, {} issues, {} pull requests",
            locator.full_name(),
            contributors.len(),
            issues.items().len(),
            pull_requests.items().len()
        );

        Ok(RepoDataBundle {
            stats,
            contributors,
            issues,
            pull_requests,
        })
    }
}
