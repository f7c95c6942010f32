//! Shared HTTP utilities for gateway implementations.

use std::time::Duration;

use http::HeaderMap;
use http::header::RETRY_AFTER;

/// Reads a `Retry-After` header expressed in seconds.
///
/// GitHub only emits the delta-seconds form, so HTTP-date values are ignored.
pub(super) fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|raw| raw.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

pub(super) fn extract_documentation_url(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("documentation_url")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
