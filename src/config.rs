//! Integration configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.girder.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GIRDER_TOKEN`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`
//!
//! # Configuration File
//!
//! Place `.girder.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! token = "ghp_example"
//! github_host = "ghe.example.net"
//! github_api_base_url = "https://ghe.example.net/api/v3"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::DispatchError;
use crate::github::integrations::{GitHubIntegration, IntegrationRegistry};

const DEFAULT_GITHUB_HOST: &str = "github.com";

/// Integration configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `GIRDER_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `GIRDER_GITHUB_HOST` or `--github-host`: GitHub host to dispatch against
/// - `GIRDER_GITHUB_API_BASE_URL` or `--github-api-base-url`: API base override
///
/// # Example
///
/// ```no_run
/// use girder::GirderConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GirderConfig::load().expect("failed to load configuration");
/// let integrations = config.integrations().expect("invalid integration config");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GIRDER",
    discovery(
        dotfile_name = ".girder.toml",
        config_file_name = "girder.toml",
        app_name = "girder"
    )
)]
pub struct GirderConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `GIRDER_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub host the configured integration covers (e.g.,
    /// "ghe.example.net"). Defaults to the public `github.com`.
    ///
    /// Can be provided via:
    /// - CLI: `--github-host <HOST>`
    /// - Environment: `GIRDER_GITHUB_HOST`
    /// - Config file: `github_host = "..."`
    #[ortho_config()]
    pub github_host: Option<String>,

    /// API base URL override for the configured host.
    ///
    /// Without one, the public host uses `https://api.github.com` and any
    /// other host `https://<host>/api/v3`.
    ///
    /// Can be provided via:
    /// - CLI: `--github-api-base-url <URL>`
    /// - Environment: `GIRDER_GITHUB_API_BASE_URL`
    /// - Config file: `github_api_base_url = "..."`
    #[ortho_config()]
    pub github_api_base_url: Option<String>,
}

impl GirderConfig {
    /// Token from configuration, falling back to the legacy environment
    /// variable.
    fn token_from_sources(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
    }

    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// For backward compatibility, if no token is provided via `GIRDER_TOKEN`,
    /// the CLI, or a configuration file, this method falls back to reading
    /// `GITHUB_TOKEN` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, DispatchError> {
        self.token_from_sources()
            .ok_or(DispatchError::MissingToken)
    }

    /// Builds the integration registry described by this configuration.
    ///
    /// The registry covers a single host: `github_host` when configured,
    /// otherwise the public `github.com`. A resolvable token is attached to
    /// the integration; its absence is not an error here, since the action
    /// input may carry an explicit token of its own.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when `github_api_base_url` is
    /// not a valid absolute URL.
    pub fn integrations(&self) -> Result<IntegrationRegistry, DispatchError> {
        let host = self.github_host.as_deref().unwrap_or(DEFAULT_GITHUB_HOST);

        let mut integration = GitHubIntegration::new(host);
        if let Some(api_base_url) = self.github_api_base_url.as_deref() {
            integration = integration.with_api_base_url(api_base_url)?;
        }
        if let Some(token) = self.token_from_sources() {
            integration = integration.with_token(token);
        }

        Ok(IntegrationRegistry::new(vec![integration]))
    }
}

#[cfg(test)]
mod tests {
    use ortho_config::MergeComposer;
    use rstest::rstest;
    use serde_json::json;

    use super::GirderConfig;
    use crate::github::error::DispatchError;

    #[rstest]
    fn resolve_token_prefers_the_configured_value() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
        let config = GirderConfig {
            token: Some("configured-token".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_token().ok(),
            Some("configured-token".to_owned()),
            "configured token should win over the legacy environment variable"
        );
    }

    #[rstest]
    fn resolve_token_falls_back_to_the_legacy_environment_variable() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
        let config = GirderConfig::default();

        assert_eq!(config.resolve_token().ok(), Some("legacy-token".to_owned()));
    }

    #[rstest]
    fn resolve_token_errors_without_any_source() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = GirderConfig::default();

        assert_eq!(config.resolve_token(), Err(DispatchError::MissingToken));
    }

    #[rstest]
    fn integrations_default_to_the_public_host() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = GirderConfig::default();

        let registry = config.integrations().expect("registry should build");
        let integration = registry
            .for_host("github.com")
            .expect("public host should be configured");
        assert_eq!(integration.token(), None);
        assert_eq!(integration.api_base_url(), None);
    }

    #[rstest]
    fn integrations_apply_the_configured_host_and_api_base() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = GirderConfig {
            token: Some("configured-token".to_owned()),
            github_host: Some("ghe.example.net".to_owned()),
            github_api_base_url: Some("https://ghe.example.net/api/v3".to_owned()),
        };

        let registry = config.integrations().expect("registry should build");
        assert!(
            registry.for_host("github.com").is_none(),
            "only the configured host should be covered"
        );
        let integration = registry
            .for_host("ghe.example.net")
            .expect("configured host should be covered");
        assert_eq!(integration.token(), Some("configured-token"));
        assert_eq!(
            integration.api_base_url().map(url::Url::as_str),
            Some("https://ghe.example.net/api/v3")
        );
    }

    #[rstest]
    fn invalid_api_base_url_is_rejected() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = GirderConfig {
            github_api_base_url: Some("not a url".to_owned()),
            ..Default::default()
        };

        let error = config
            .integrations()
            .expect_err("invalid API base should fail");
        assert!(
            matches!(error, DispatchError::InvalidUrl(_)),
            "expected InvalidUrl, got {error:?}"
        );
    }

    #[rstest]
    fn environment_layer_overrides_the_file_layer() {
        let mut composer = MergeComposer::new();
        composer.push_file(json!({"token": "file-token"}), None);
        composer.push_environment(json!({"token": "env-token"}));

        let config =
            GirderConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

        assert_eq!(
            config.token.as_deref(),
            Some("env-token"),
            "environment should override file"
        );
    }
}
