//! The `github:actions:dispatch` template action.
//!
//! Triggers a CI workflow run on a repository referenced by a template
//! parameter. The action is thin glue: parse the repository location, resolve
//! credentials, build a rate-aware client, issue one dispatch call, and log
//! the outcome. All failures bubble to the invoking engine unmodified.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GirderConfig;
use crate::scaffolder::action::{ActionContext, TemplateAction};
use crate::scaffolder::logger::ActionLogger;

use super::error::DispatchError;
use super::gateway::{OctocrabDispatchGateway, WorkflowDispatch, WorkflowDispatchGateway};
use super::integrations::{CredentialsProvider, IntegrationRegistry, resolve_client_options};
use super::locator::RepositoryLocator;
use super::throttle::ThrottlePolicy;

/// Id the dispatch action registers under.
pub const DISPATCH_ACTION_ID: &str = "github:actions:dispatch";

/// Validated input of the dispatch action.
///
/// Field names mirror the template parameter schema, so the wire form is
/// camelCase and unknown fields are rejected before the handler runs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkflowDispatchInput {
    /// Repository location string, `host?owner=<owner>&repo=<repo>`.
    pub repo_url: String,
    /// Workflow definition to trigger, identified by filename.
    pub workflow_id: String,
    /// Branch or tag the workflow run targets.
    pub branch_or_tag_name: String,
    /// Named inputs passed through to the triggered workflow. GitHub caps
    /// these at ten entries and enforces the cap itself.
    #[serde(default)]
    pub workflow_inputs: Option<BTreeMap<String, String>>,
    /// Explicit token overriding any configured credential source.
    #[serde(default)]
    pub token: Option<String>,
}

/// Template action that triggers a workflow dispatch event.
pub struct DispatchWorkflowAction {
    integrations: IntegrationRegistry,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    policy: ThrottlePolicy,
}

impl DispatchWorkflowAction {
    /// Creates the action over the given integrations with the default
    /// throttle policy and no credentials provider.
    #[must_use]
    pub fn new(integrations: IntegrationRegistry) -> Self {
        Self {
            integrations,
            credentials_provider: None,
            policy: ThrottlePolicy::default(),
        }
    }

    /// Wires a ready action from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidUrl`] when the configured API base URL
    /// is not a valid URL.
    pub fn from_config(config: &GirderConfig) -> Result<Self, DispatchError> {
        Ok(Self::new(config.integrations()?))
    }

    /// Attaches a credentials provider consulted when the input carries no
    /// explicit token.
    #[must_use]
    pub fn with_credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Overrides the throttle policy applied to the dispatch call.
    #[must_use]
    pub const fn with_throttle_policy(mut self, policy: ThrottlePolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn dispatch_with(
        gateway: &dyn WorkflowDispatchGateway,
        locator: &RepositoryLocator,
        input: &WorkflowDispatchInput,
        logger: &dyn ActionLogger,
    ) -> Result<(), DispatchError> {
        let dispatch = WorkflowDispatch {
            workflow_id: input.workflow_id.clone(),
            git_ref: input.branch_or_tag_name.clone(),
            inputs: input.workflow_inputs.clone(),
        };

        gateway.create_workflow_dispatch(locator, &dispatch).await?;

        logger.info(&format!(
            "Workflow {workflow_id} dispatched successfully",
            workflow_id = input.workflow_id
        ));
        Ok(())
    }
}

#[async_trait]
impl TemplateAction for DispatchWorkflowAction {
    fn id(&self) -> &'static str {
        DISPATCH_ACTION_ID
    }

    fn description(&self) -> &'static str {
        "Dispatches a GitHub Action workflow for a given branch or tag"
    }

    async fn execute(&self, context: &ActionContext) -> Result<(), DispatchError> {
        let input: WorkflowDispatchInput = context.input()?;

        context.logger().info(&format!(
            "Dispatching workflow {workflow_id} for repo {repo_url} on {git_ref}",
            workflow_id = input.workflow_id,
            repo_url = input.repo_url,
            git_ref = input.branch_or_tag_name
        ));

        let locator = RepositoryLocator::from_repo_url(&input.repo_url, &self.integrations)?;
        let options = resolve_client_options(
            &self.integrations,
            &locator,
            self.credentials_provider.as_deref(),
            input.token.as_deref(),
        )?;
        let gateway = OctocrabDispatchGateway::from_options(&options, self.policy)?;

        Self::dispatch_with(&gateway, &locator, &input, context.logger()).await
    }
}
