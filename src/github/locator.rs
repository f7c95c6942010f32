//! Repository location parsing and identity wrappers.
//!
//! Template parameters reference repositories with a location string of the
//! form `host?owner=<owner>&repo=<repo>` (e.g.
//! `github.com?owner=acme&repo=demo`). Parsing resolves the string into a
//! validated owner/repository identity plus the API base URL for the host.

use url::Url;

use super::error::DispatchError;
use super::integrations::IntegrationRegistry;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, DispatchError> {
        if value.is_empty() {
            return Err(DispatchError::InvalidInput {
                message: "repository owner must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, DispatchError> {
        if value.is_empty() {
            return Err(DispatchError::InvalidUrl(
                "repository name must not be empty".to_owned(),
            ));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(host: &str, port: Option<u16>) -> Result<Url, DispatchError> {
    if host.eq_ignore_ascii_case("github.com") {
        Url::parse("https://api.github.com")
            .map_err(|error| DispatchError::InvalidUrl(error.to_string()))
    } else {
        let mut api_url = Url::parse(&format!("https://{host}"))
            .map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| DispatchError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// Resolved repository identity with the derived API base.
///
/// # Example
///
/// ```
/// use girder::github::locator::RepositoryLocator;
/// use girder::github::integrations::IntegrationRegistry;
///
/// let integrations = IntegrationRegistry::github_com();
/// let locator = RepositoryLocator::from_repo_url("github.com?owner=acme&repo=demo", &integrations)
///     .expect("should parse repository location");
/// assert_eq!(locator.owner().as_str(), "acme");
/// assert_eq!(locator.repository().as_str(), "demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    host: String,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a repository locator from owner and repository name strings.
    ///
    /// Uses `github.com` as the default host.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidInput`] when the owner is empty or
    /// [`DispatchError::InvalidUrl`] when the repository name is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, DispatchError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base = Url::parse("https://api.github.com")
            .map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            host: "github.com".to_owned(),
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a template location string of the form
    /// `host?owner=<owner>&repo=<repo>`.
    ///
    /// The host must match a configured integration; the integration may
    /// override the derived API base URL (public `github.com` maps to
    /// `https://api.github.com`, any other host to `https://<host>/api/v3`).
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when the string cannot be parsed
    /// or names no repository, [`DispatchError::UnknownHost`] when no
    /// integration covers the host, and [`DispatchError::InvalidInput`] when
    /// the owner parameter is absent or empty.
    pub fn from_repo_url(
        repo_url: &str,
        integrations: &IntegrationRegistry,
    ) -> Result<Self, DispatchError> {
        let parsed = Url::parse(&format!("https://{repo_url}"))
            .map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| DispatchError::InvalidUrl("repo URL must include a host".to_owned()))?
            .to_owned();

        let integration =
            integrations
                .for_host(&host)
                .ok_or_else(|| DispatchError::UnknownHost {
                    host: host.clone(),
                })?;

        let mut owner_param = None;
        let mut repo_param = None;
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "owner" => owner_param = Some(value.into_owned()),
                "repo" => repo_param = Some(value.into_owned()),
                _ => {}
            }
        }

        let repo = repo_param.ok_or_else(|| {
            DispatchError::InvalidUrl(format!("repo URL `{repo_url}` names no repository"))
        })?;
        let owner = owner_param.ok_or_else(|| DispatchError::InvalidInput {
            message: format!("repo URL `{repo_url}` names no owner"),
        })?;

        let api_base = match integration.api_base_url() {
            Some(base) => base.clone(),
            None => derive_api_base_from_host(&host, parsed.port())?,
        };

        Ok(Self {
            api_base,
            host,
            owner: RepositoryOwner::new(&owner)?,
            repository: RepositoryName::new(&repo)?,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Host the repository lives on.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the API path that triggers a workflow dispatch event.
    pub(crate) fn workflow_dispatches_path(&self, workflow_id: &str) -> String {
        format!(
            "/repos/{}/{}/actions/workflows/{}/dispatches",
            self.owner.as_str(),
            self.repository.as_str(),
            workflow_id
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::RepositoryLocator;
    use crate::github::error::DispatchError;
    use crate::github::integrations::{GitHubIntegration, IntegrationRegistry};

    #[rstest]
    fn parses_owner_and_repo_query_parameters() {
        let integrations = IntegrationRegistry::github_com();
        let locator =
            RepositoryLocator::from_repo_url("github.com?repo=demo&owner=acme", &integrations)
                .expect("should parse repository location");

        assert_eq!(locator.owner().as_str(), "acme", "owner mismatch");
        assert_eq!(locator.repository().as_str(), "demo", "repository mismatch");
        assert_eq!(locator.host(), "github.com");
        assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
    }

    #[rstest]
    fn missing_owner_is_an_input_error() {
        let integrations = IntegrationRegistry::github_com();
        let error = RepositoryLocator::from_repo_url("github.com?repo=demo", &integrations)
            .expect_err("missing owner should fail");

        assert!(
            matches!(error, DispatchError::InvalidInput { .. }),
            "expected InvalidInput, got {error:?}"
        );
    }

    #[rstest]
    fn empty_owner_is_an_input_error() {
        let integrations = IntegrationRegistry::github_com();
        let error = RepositoryLocator::from_repo_url("github.com?repo=demo&owner=", &integrations)
            .expect_err("empty owner should fail");

        assert!(
            matches!(error, DispatchError::InvalidInput { .. }),
            "expected InvalidInput, got {error:?}"
        );
    }

    #[rstest]
    fn missing_repo_is_an_invalid_url() {
        let integrations = IntegrationRegistry::github_com();
        let error = RepositoryLocator::from_repo_url("github.com?owner=acme", &integrations)
            .expect_err("missing repo should fail");

        assert!(
            matches!(error, DispatchError::InvalidUrl(_)),
            "expected InvalidUrl, got {error:?}"
        );
    }

    #[rstest]
    fn unconfigured_host_is_rejected() {
        let integrations = IntegrationRegistry::github_com();
        let error =
            RepositoryLocator::from_repo_url("ghe.example.net?owner=acme&repo=demo", &integrations)
                .expect_err("unknown host should fail");

        assert!(
            matches!(error, DispatchError::UnknownHost { ref host } if host == "ghe.example.net"),
            "expected UnknownHost, got {error:?}"
        );
    }

    #[rstest]
    fn enterprise_host_derives_v3_api_base() {
        let integrations =
            IntegrationRegistry::new(vec![GitHubIntegration::new("ghe.example.net")]);
        let locator = RepositoryLocator::from_repo_url(
            "ghe.example.net?owner=acme&repo=demo",
            &integrations,
        )
        .expect("should parse enterprise location");

        assert_eq!(locator.api_base().as_str(), "https://ghe.example.net/api/v3");
    }

    #[rstest]
    fn integration_api_base_overrides_derivation() {
        let integration = GitHubIntegration::new("ghe.example.net")
            .with_api_base_url("http://127.0.0.1:9999/api/v3")
            .expect("api base should parse");
        let integrations = IntegrationRegistry::new(vec![integration]);

        let locator = RepositoryLocator::from_repo_url(
            "ghe.example.net?owner=acme&repo=demo",
            &integrations,
        )
        .expect("should parse enterprise location");

        assert_eq!(
            locator.api_base().as_str(),
            "http://127.0.0.1:9999/api/v3",
            "configured API base should win"
        );
    }

    #[rstest]
    fn renders_the_workflow_dispatch_path() {
        let locator =
            RepositoryLocator::from_owner_repo("acme", "demo").expect("should create locator");

        assert_eq!(
            locator.workflow_dispatches_path("ci.yml"),
            "/repos/acme/demo/actions/workflows/ci.yml/dispatches"
        );
    }
}
