//! Gateways for triggering workflow dispatch events through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests, including the rate-limit retry
//! loop.

mod client;
mod dispatch;
mod error_mapping;
mod http_utils;

pub use dispatch::OctocrabDispatchGateway;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::github::error::DispatchError;
use crate::github::locator::RepositoryLocator;

/// Parameters of one workflow dispatch event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDispatch {
    /// Workflow definition to trigger, identified by filename (e.g. `ci.yml`).
    pub workflow_id: String,
    /// Branch or tag the workflow run targets.
    pub git_ref: String,
    /// Named inputs passed through to the triggered workflow.
    pub inputs: Option<BTreeMap<String, String>>,
}

/// Gateway that can trigger a workflow dispatch event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowDispatchGateway: Send + Sync {
    /// Issues one logical dispatch call for the repository.
    ///
    /// Rate-limited responses may be retried transparently; any unrecovered
    /// failure surfaces unmodified.
    async fn create_workflow_dispatch(
        &self,
        locator: &RepositoryLocator,
        dispatch: &WorkflowDispatch,
    ) -> Result<(), DispatchError>;
}
