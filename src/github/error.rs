//! Error types exposed by the GitHub dispatch layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while validating action input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The action input failed schema validation.
    #[error("invalid action input: {message}")]
    InvalidInput {
        /// Description of the offending field or value.
        message: String,
    },

    /// No action is registered under the requested id.
    #[error("no action registered with id `{id}`")]
    UnknownAction {
        /// The id the template engine asked for.
        id: String,
    },

    /// The provided repository location string could not be parsed.
    #[error("repository URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository host does not match any configured integration.
    #[error("no GitHub integration configured for host `{host}`")]
    UnknownHost {
        /// Host extracted from the repository URL.
        host: String,
    },

    /// No credential source yielded an authentication token.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Rate limit retries were exhausted without a successful response.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if available from response headers.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
