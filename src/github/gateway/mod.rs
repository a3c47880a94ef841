//! Gateways for loading repository resources through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests. Each method issues exactly one
//! request for the first page of its resource and never retries.

mod client;
mod error_mapping;
mod http_utils;
mod repository;

pub use client::{ClientConfig, DEFAULT_API_BASE};
pub use repository::OctocrabRepositoryDataGateway;

use async_trait::async_trait;

use crate::github::error::RepoDataError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{Contributor, Issue, PullRequest, RepositoryStats};

/// Page size requested for contributors.
pub const CONTRIBUTORS_PER_PAGE: u8 = 100;
/// Page size requested for issues.
pub const ISSUES_PER_PAGE: u8 = 100;
/// Page size requested for pull requests; kept small for unauthenticated
/// rate budgets.
pub const PULL_REQUESTS_PER_PAGE: u8 = 30;

/// Gateway that can load the four repository resources.
///
/// Lists hold the first page only; a truncated list is expected when the
/// repository has more entries than the page size.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryDataGateway: Send + Sync {
    /// Fetch repository statistics.
    async fn repository_stats(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryStats, RepoDataError>;

    /// Fetch the first page of contributors.
    async fn contributors(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<Contributor>, RepoDataError>;

    /// Fetch the first page of issues in any state.
    async fn issues(&self, locator: &RepositoryLocator) -> Result<Vec<Issue>, RepoDataError>;

    /// Fetch the first page of pull requests in any state.
    async fn pull_requests(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Vec<PullRequest>, RepoDataError>;
}
