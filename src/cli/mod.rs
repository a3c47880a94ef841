//! Repository summary command.
//!
//! Loads one repository through the aggregator and prints either a text
//! summary or JSON. Output formatting utilities are in [`output`].

use std::io::{self, Write};

use repolens::{
    ClientConfig, OctocrabRepositoryDataGateway, RepoDataError, RepolensConfig,
    RepositoryAggregator, RepositoryDataGateway, RepositoryInsights,
};

pub mod output;


use output::{write_json_summary, write_text_summary};

/// Loads the configured repository and writes its summary to stdout.
///
/// # Errors
///
/// Returns [`RepoDataError::Configuration`] if required configuration is
/// missing or invalid, or the classified error of a mandatory fetch.
pub async fn run(config: &RepolensConfig) -> Result<(), RepoDataError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(config, OctocrabRepositoryDataGateway::from_config, &mut stdout)
        .await
}

/// Loads the configured repository using a caller-supplied gateway.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &RepolensConfig,
    build_gateway: F,
    writer: &mut W,
) -> Result<(), RepoDataError>
where
    G: RepositoryDataGateway,
    F: FnOnce(&ClientConfig) -> Result<G, RepoDataError>,
    W: Write,
{
    let (owner, repo) = config.require_repository_info()?;
    let client_config = config.client_config()?;
    let gateway = build_gateway(&client_config)?;

    let bundle = RepositoryAggregator::new(&gateway).load(owner, repo).await?;
    let insights = RepositoryInsights::from_bundle(&bundle);

    if config.json {
        write_json_summary(writer, &bundle, &insights)
    } else {
        write_text_summary(writer, &bundle, &insights)
    }
}
