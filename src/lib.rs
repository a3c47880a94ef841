//! Repolens library crate for loading GitHub repository data.
//!
//! The library wraps Octocrab to normalise repository identifiers, fetch a
//! repository's statistics, contributors, issues and pull requests, classify
//! failures into friendly errors, and derive summary insights that can be
//! displayed in the CLI.

pub mod config;
pub mod github;
pub mod insights;

pub use config::RepolensConfig;
pub use github::{
    ClientConfig, OctocrabRepositoryDataGateway, PersonalAccessToken, RepoDataBundle,
    RepoDataError, RepositoryAggregator, RepositoryDataGateway, RepositoryLocator,
    ResourceOutcome,
};
pub use insights::RepositoryInsights;
