//! Shared HTTP utilities for gateway implementations.

use http::Uri;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::github::classify::TransportFailure;

/// Joins a resource path and its query parameters into a request URI.
pub(super) fn request_uri(path: &str, query: &[(&str, &str)]) -> Result<Uri, TransportFailure> {
    let target = if query.is_empty() {
        path.to_owned()
    } else {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        format!("{path}?{encoded}")
    };

    target
        .parse::<Uri>()
        .map_err(|error| TransportFailure::Unknown {
            message: format!("invalid request path '{target}': {error}"),
        })
}

/// Decodes a success body, reporting failures as unknown transport errors.
pub(super) fn decode_body<T: DeserializeOwned>(
    operation: &str,
    body: &str,
) -> Result<T, TransportFailure> {
    serde_json::from_str(body).map_err(|error| TransportFailure::Unknown {
        message: format!("{operation} response deserialisation failed: {error}"),
    })
}
