//! Error mapping helpers for the Octocrab dispatch gateway.

use http::{HeaderMap, StatusCode};

use crate::github::error::DispatchError;
use crate::github::rate_limit::RateLimitInfo;
use crate::github::throttle::RateLimitSignal;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Classifies a response as a primary or secondary rate-limit signal.
///
/// GitHub raises both over 403/429. Secondary limits name themselves in the
/// error message or documentation URL; primary limits exhaust the
/// `X-RateLimit-Remaining` budget. Anything else is not a rate-limit signal.
pub(super) fn classify_rate_limit(
    status: StatusCode,
    headers: &HeaderMap,
    message: Option<&str>,
    documentation_url: Option<&str>,
) -> Option<RateLimitSignal> {
    if !matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    ) {
        return None;
    }

    let message = message.map(str::to_lowercase).unwrap_or_default();
    if message.contains("secondary rate limit")
        || documentation_url.is_some_and(|url| url.contains("secondary-rate-limit"))
    {
        return Some(RateLimitSignal::Secondary);
    }

    let quota_spent = RateLimitInfo::from_headers(headers).is_some_and(|info| info.is_exhausted());
    if quota_spent || message.contains("rate limit") {
        return Some(RateLimitSignal::Primary);
    }

    None
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> DispatchError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            DispatchError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            DispatchError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return DispatchError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    DispatchError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> DispatchError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        DispatchError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        DispatchError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}
