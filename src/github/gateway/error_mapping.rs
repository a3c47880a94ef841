//! Error mapping helpers for the Octocrab gateway implementation.

use http::HeaderMap;

use crate::github::classify::TransportFailure;

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Converts an Octocrab error raised before a response was read.
///
/// Raw requests do not normally surface `GitHub` errors, but when one appears
/// its status and message are kept so the classifier still sees them.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> TransportFailure {
    if let octocrab::Error::GitHub { source, .. } = error {
        return TransportFailure::Http {
            status: source.status_code,
            headers: HeaderMap::new(),
            body: serde_json::json!({ "message": source.message }).to_string(),
        };
    }

    if is_network_error(error) {
        return TransportFailure::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    TransportFailure::Unknown {
        message: format!("{operation} failed: {error}"),
    }
}
