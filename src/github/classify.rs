//! Classification of failed outbound calls into [`RepoDataError`] values.
//!
//! The transport reports what went wrong as a [`TransportFailure`]; this
//! module turns it into one of the user-facing variants so callers see the
//! same text regardless of which resource failed.

use http::{HeaderMap, StatusCode};

use super::error::{RepoDataError, UNEXPECTED_ERROR_MESSAGE};
use super::rate_limit::RateLimitInfo;

/// Failure reported by the transport for a single outbound call.
#[derive(Debug, Clone)]
pub enum TransportFailure {
    /// The server answered with a non-success status.
    Http {
        /// Response status.
        status: StatusCode,
        /// Response headers, used for rate-limit detection.
        headers: HeaderMap,
        /// Raw response body, possibly empty.
        body: String,
    },
    /// No response arrived (connection, DNS, TLS or timeout failure).
    Network {
        /// Transport-level error detail.
        message: String,
    },
    /// Anything else, such as an undecodable success body.
    Unknown {
        /// Description of the failure.
        message: String,
    },
}

/// Maps a transport failure to its user-facing error.
///
/// Checks run in a fixed order: 404, rate-limited 403, plain 403, 401, an
/// upstream `message` field, the bare status, then network and unknown
/// failures. Rate-limit detection must precede the generic 403 case.
#[must_use]
pub fn classify(failure: &TransportFailure) -> RepoDataError {
    match failure {
        TransportFailure::Http {
            status,
            headers,
            body,
        } => classify_status(*status, headers, body),
        TransportFailure::Network { .. } => RepoDataError::NoResponse,
        TransportFailure::Unknown { message } => {
            let trimmed = message.trim();
            if trimmed.is_empty() {
                RepoDataError::Unknown(UNEXPECTED_ERROR_MESSAGE.to_owned())
            } else {
                RepoDataError::Unknown(trimmed.to_owned())
            }
        }
    }
}

fn classify_status(status: StatusCode, headers: &HeaderMap, body: &str) -> RepoDataError {
    match status {
        StatusCode::NOT_FOUND => RepoDataError::NotFound,
        StatusCode::FORBIDDEN => {
            let rate_limit = RateLimitInfo::from_headers(headers);
            if rate_limit.is_some_and(|info| info.is_exhausted()) {
                RepoDataError::RateLimited { rate_limit }
            } else {
                RepoDataError::Forbidden
            }
        }
        StatusCode::UNAUTHORIZED => RepoDataError::Unauthorized,
        other => extract_github_message(body).map_or_else(
            || RepoDataError::UpstreamStatus(other.as_u16()),
            RepoDataError::UpstreamMessage,
        ),
    }
}

/// Reads the `message` field GitHub includes in JSON error bodies.
pub(crate) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}
