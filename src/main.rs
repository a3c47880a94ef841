//! Repolens CLI entrypoint for summarising a GitHub repository.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use repolens::{RepoDataError, RepolensConfig};
use tracing_subscriber::EnvFilter;

mod cli;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let message = cli::output::failure_message(&error);
            if writeln!(io::stderr().lock(), "{message}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RepoDataError> {
    let config = load_config()?;
    cli::run(&config).await
}

/// Installs a stderr log subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RepoDataError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RepolensConfig, RepoDataError> {
    RepolensConfig::load().map_err(|error| RepoDataError::Configuration {
        message: error.to_string(),
    })
}
