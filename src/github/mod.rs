//! GitHub repository data loading.
//!
//! This module wraps Octocrab to normalise repository identifiers, fetch a
//! repository's statistics, contributors, issues and pull requests, and
//! aggregate them under a mandatory/optional failure policy. Transport
//! failures are classified into user-facing variants so that callers can
//! surface precise failures without exposing Octocrab internals.

pub mod aggregator;
pub mod classify;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use aggregator::RepositoryAggregator;
pub use classify::{TransportFailure, classify};
pub use error::{RepoDataError, UNEXPECTED_ERROR_MESSAGE};
pub use gateway::{
    ClientConfig, DEFAULT_API_BASE, OctocrabRepositoryDataGateway, RepositoryDataGateway,
};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{
    Author, Contributor, Issue, IssueState, OwnerProfile, PullRequest, RepoDataBundle,
    RepositoryStats, ResourceOutcome,
};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockRepositoryDataGateway;

#[cfg(test)]
mod tests;
