//! Octocrab implementation of the workflow dispatch gateway.

use std::collections::BTreeMap;

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;
use serde::Serialize;
use tokio::time::sleep;

use crate::github::error::DispatchError;
use crate::github::integrations::{ClientOptions, PersonalAccessToken};
use crate::github::locator::RepositoryLocator;
use crate::github::rate_limit::RateLimitInfo;
use crate::github::throttle::{RetryDecision, ThrottlePolicy};

use super::client::build_octocrab_client;
use super::error_mapping::{classify_rate_limit, map_http_error, map_octocrab_error};
use super::http_utils::{extract_documentation_url, extract_github_message, parse_retry_after};
use super::{WorkflowDispatch, WorkflowDispatchGateway};

/// Request body of the dispatch endpoint.
///
/// GitHub rejects a null `inputs` member, so the field is omitted entirely
/// when the template supplied none.
#[derive(Debug, Serialize)]
struct DispatchBody<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    inputs: Option<&'a BTreeMap<String, String>>,
}

/// Octocrab-backed dispatch gateway with rate-limit retries.
pub struct OctocrabDispatchGateway {
    client: Octocrab,
    policy: ThrottlePolicy,
}

impl OctocrabDispatchGateway {
    /// Creates a gateway from an Octocrab client and a throttle policy.
    #[must_use]
    pub const fn new(client: Octocrab, policy: ThrottlePolicy) -> Self {
        Self { client, policy }
    }

    /// Builds a gateway from resolved client options.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when the API base cannot be
    /// parsed or [`DispatchError::Api`] when Octocrab fails to construct a
    /// client.
    pub fn from_options(
        options: &ClientOptions,
        policy: ThrottlePolicy,
    ) -> Result<Self, DispatchError> {
        let octocrab = build_octocrab_client(options)?;
        Ok(Self::new(octocrab, policy))
    }

    /// Builds a gateway for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when the base URI cannot be
    /// parsed or [`DispatchError::Api`] when Octocrab fails to construct a
    /// client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
        policy: ThrottlePolicy,
    ) -> Result<Self, DispatchError> {
        let options = ClientOptions::new(locator.api_base().clone(), token.clone());
        Self::from_options(&options, policy)
    }
}

#[async_trait]
impl WorkflowDispatchGateway for OctocrabDispatchGateway {
    async fn create_workflow_dispatch(
        &self,
        locator: &RepositoryLocator,
        dispatch: &WorkflowDispatch,
    ) -> Result<(), DispatchError> {
        let uri: Uri = locator
            .workflow_dispatches_path(&dispatch.workflow_id)
            .parse::<Uri>()
            .map_err(|error| DispatchError::InvalidUrl(error.to_string()))?;

        let body = DispatchBody {
            git_ref: &dispatch.git_ref,
            inputs: dispatch.inputs.as_ref(),
        };

        let mut retry_count = 0_u32;
        loop {
            let response = self
                .client
                ._post(uri.clone(), Some(&body))
                .await
                .map_err(|error| map_octocrab_error("workflow dispatch", &error))?;

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            let headers = response.headers().clone();
            let suggested_wait = parse_retry_after(&headers);
            let rate_limit = RateLimitInfo::from_headers(&headers);

            let body_text = self
                .client
                .body_to_string(response)
                .await
                .unwrap_or_else(|_| String::new());
            let message = extract_github_message(&body_text);
            let documentation_url = extract_documentation_url(&body_text);

            let Some(signal) = classify_rate_limit(
                status,
                &headers,
                message.as_deref(),
                documentation_url.as_deref(),
            ) else {
                return Err(map_http_error("workflow dispatch", status, message));
            };

            match self.policy.decide(signal, retry_count) {
                RetryDecision::Retry => {
                    let wait =
                        self.policy
                            .wait_before_retry(signal, suggested_wait, rate_limit.as_ref());
                    if !wait.is_zero() {
                        sleep(wait).await;
                    }
                    retry_count += 1;
                }
                RetryDecision::GiveUp => {
                    let detail = message
                        .unwrap_or_else(|| format!("GitHub returned {status} with no detail"));
                    return Err(DispatchError::RateLimitExceeded {
                        rate_limit,
                        message: format!(
                            "workflow dispatch failed after {retry_count} retries: {detail}"
                        ),
                    });
                }
            }
        }
    }
}
