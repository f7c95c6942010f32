//! Configured GitHub integrations and credential resolution.
//!
//! An integration describes one GitHub host the scaffolding engine may talk
//! to: the public `github.com` or an Enterprise install, optionally with its
//! own API base URL and a configured token. Credential resolution turns an
//! integration plus an optional explicit token override into the options an
//! authenticated client is built from.

use url::Url;

use super::error::DispatchError;
use super::locator::RepositoryLocator;

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, DispatchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DispatchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// One configured GitHub host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubIntegration {
    host: String,
    api_base_url: Option<Url>,
    token: Option<String>,
}

impl GitHubIntegration {
    /// Creates an integration for the given host with no token and the
    /// default API base derivation.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_base_url: None,
            token: None,
        }
    }

    /// Sets a configured token for this host.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the API base URL for this host.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when the value is not a valid
    /// absolute URL.
    pub fn with_api_base_url(mut self, api_base_url: &str) -> Result<Self, DispatchError> {
        let parsed =
            Url::parse(api_base_url).map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;
        self.api_base_url = Some(parsed);
        Ok(self)
    }

    /// Host this integration covers.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Configured API base override, if any.
    #[must_use]
    pub const fn api_base_url(&self) -> Option<&Url> {
        self.api_base_url.as_ref()
    }

    /// Configured token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Registry of configured GitHub integrations, keyed by host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationRegistry {
    integrations: Vec<GitHubIntegration>,
}

impl IntegrationRegistry {
    /// Creates a registry over the given integrations.
    #[must_use]
    pub const fn new(integrations: Vec<GitHubIntegration>) -> Self {
        Self { integrations }
    }

    /// Registry covering only the public `github.com` host.
    #[must_use]
    pub fn github_com() -> Self {
        Self::new(vec![GitHubIntegration::new("github.com")])
    }

    /// Looks up the integration for a host, ignoring ASCII case.
    #[must_use]
    pub fn for_host(&self, host: &str) -> Option<&GitHubIntegration> {
        self.integrations
            .iter()
            .find(|integration| integration.host.eq_ignore_ascii_case(host))
    }
}

/// External source of credentials, consulted when the action input carries no
/// explicit token.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialsProvider: Send + Sync {
    /// Resolves a token for the repository, or `None` when this provider has
    /// no credentials for it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the provider itself fails.
    fn credentials_for(
        &self,
        locator: &RepositoryLocator,
    ) -> Result<Option<PersonalAccessToken>, DispatchError>;
}

/// Resolved options an authenticated client is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    api_base: Url,
    token: PersonalAccessToken,
}

impl ClientOptions {
    /// Creates options from an API base and a validated token.
    #[must_use]
    pub const fn new(api_base: Url, token: PersonalAccessToken) -> Self {
        Self { api_base, token }
    }

    /// API base URL the client targets.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Token the client authenticates with.
    #[must_use]
    pub const fn token(&self) -> &PersonalAccessToken {
        &self.token
    }
}

/// Resolves client options for a repository.
///
/// Token precedence: an explicit token from the action input wins over the
/// credentials provider, which wins over the token configured on the host's
/// integration.
///
/// # Errors
///
/// Returns [`DispatchError::MissingToken`] when no source yields a token, or
/// any error the credentials provider raises.
pub fn resolve_client_options(
    integrations: &IntegrationRegistry,
    locator: &RepositoryLocator,
    credentials_provider: Option<&dyn CredentialsProvider>,
    explicit_token: Option<&str>,
) -> Result<ClientOptions, DispatchError> {
    let api_base = locator.api_base().clone();

    if let Some(token) = explicit_token {
        return Ok(ClientOptions {
            api_base,
            token: PersonalAccessToken::new(token)?,
        });
    }

    if let Some(provider) = credentials_provider
        && let Some(token) = provider.credentials_for(locator)?
    {
        return Ok(ClientOptions { api_base, token });
    }

    let configured = integrations
        .for_host(locator.host())
        .and_then(GitHubIntegration::token)
        .ok_or(DispatchError::MissingToken)?;

    Ok(ClientOptions {
        api_base,
        token: PersonalAccessToken::new(configured)?,
    })
}
