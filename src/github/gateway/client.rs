//! Octocrab client construction for the dispatch gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::DispatchError;
use crate::github::integrations::ClientOptions;

use super::error_mapping::map_octocrab_error;

/// Builds an authenticated Octocrab client from resolved options.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidUrl`] when the API base cannot be parsed
/// as a URI or [`DispatchError::Api`] when Octocrab fails to construct a
/// client.
pub(super) fn build_octocrab_client(options: &ClientOptions) -> Result<Octocrab, DispatchError> {
    let base_uri: Uri = options
        .api_base()
        .as_str()
        .parse::<Uri>()
        .map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(options.token().as_ref())
        .base_uri(base_uri)
        .map_err(|error| DispatchError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
