//! Output formatting utilities for the summary command.

use std::io::{self, Write};

use repolens::insights::UnavailableResource;
use repolens::{RepoDataBundle, RepoDataError, RepositoryInsights};
use serde::Serialize;

#[derive(Serialize)]
struct JsonSummary<'a> {
    repository: &'a RepoDataBundle,
    insights: &'a RepositoryInsights,
}

/// Writes a human-readable summary of the bundle and its insights.
pub fn write_text_summary<W: Write>(
    writer: &mut W,
    bundle: &RepoDataBundle,
    insights: &RepositoryInsights,
) -> Result<(), RepoDataError> {
    let stats = &bundle.stats;

    writeln!(writer, "{}", stats.full_name).map_err(|e| io_error(&e))?;
    if let Some(description) = stats.description.as_deref() {
        writeln!(writer, "  {description}").map_err(|e| io_error(&e))?;
    }
    writeln!(
        writer,
        "Stars: {}  Watchers: {}  Forks: {}  Open issues: {}",
        stats.stargazers_count, stats.watchers_count, stats.forks_count, stats.open_issues_count
    )
    .map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Language: {}",
        stats.language.as_deref().unwrap_or("unknown")
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    writeln!(
        writer,
        "Contributors: {} (top {})",
        bundle.contributors.len(),
        insights.top_contributors.len()
    )
    .map_err(|e| io_error(&e))?;
    for contributor in &insights.top_contributors {
        writeln!(
            writer,
            "  {} ({} contributions)",
            contributor.login, contributor.contributions
        )
        .map_err(|e| io_error(&e))?;
    }

    writeln!(
        writer,
        "Issues: {} open, {} closed",
        insights.open_issues, insights.closed_issues
    )
    .map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Pull requests: {} open, {} closed",
        insights.open_pull_requests, insights.closed_pull_requests
    )
    .map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Average issue resolution: {}",
        format_days(insights.average_resolution_days)
    )
    .map_err(|e| io_error(&e))?;
    writeln!(
        writer,
        "Average time between merges: {}",
        format_days(insights.merge_interval_days)
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "Health score: {}/100", insights.health_score).map_err(|e| io_error(&e))?;

    for resource in &insights.unavailable {
        let reason = unavailable_reason(bundle, *resource);
        writeln!(writer, "Unavailable: {resource} ({reason})").map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Writes the bundle and insights as pretty-printed JSON.
pub fn write_json_summary<W: Write>(
    writer: &mut W,
    bundle: &RepoDataBundle,
    insights: &RepositoryInsights,
) -> Result<(), RepoDataError> {
    let document = JsonSummary {
        repository: bundle,
        insights,
    };
    serde_json::to_writer_pretty(&mut *writer, &document).map_err(|error| RepoDataError::Io {
        message: error.to_string(),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))
}

/// Message shown when the command fails.
///
/// Rate-limit failures with a known reset time also say how long to wait.
#[must_use]
pub fn failure_message(error: &RepoDataError) -> String {
    match error {
        RepoDataError::RateLimited {
            rate_limit: Some(info),
        } if info.reset_at() > 0 => format!(
            "{error} Rate limit resets in {} seconds.",
            info.seconds_until_reset()
        ),
        _ => error.to_string(),
    }
}

fn unavailable_reason(bundle: &RepoDataBundle, resource: UnavailableResource) -> String {
    let error = match resource {
        UnavailableResource::Issues => bundle.issues.error(),
        UnavailableResource::PullRequests => bundle.pull_requests.error(),
    };
    error.map_or_else(|| "unknown reason".to_owned(), ToString::to_string)
}

fn format_days(days: Option<f64>) -> String {
    days.map_or_else(|| "n/a".to_owned(), |value| format!("{value:.1} days"))
}

/// Converts an I/O error to a [`RepoDataError::Io`].
pub(crate) fn io_error(error: &io::Error) -> RepoDataError {
    RepoDataError::Io {
        message: error.to_string(),
    }
}
