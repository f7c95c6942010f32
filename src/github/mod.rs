//! GitHub workflow dispatch support.
//!
//! This module wraps Octocrab to parse repository location strings, resolve
//! authentication against configured integrations, and trigger workflow
//! dispatch events with rate-limit aware retries. Errors are mapped into
//! [`DispatchError`] variants so that the invoking engine can surface precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod integrations;
pub mod locator;
pub mod rate_limit;
pub mod throttle;
pub mod workflow_dispatch;

pub use error::DispatchError;
pub use gateway::{OctocrabDispatchGateway, WorkflowDispatch, WorkflowDispatchGateway};
pub use integrations::{
    ClientOptions, CredentialsProvider, GitHubIntegration, IntegrationRegistry,
    PersonalAccessToken, resolve_client_options,
};
pub use locator::{RepositoryLocator, RepositoryName, RepositoryOwner};
pub use rate_limit::RateLimitInfo;
pub use throttle::{RateLimitSignal, RetryDecision, ThrottlePolicy};
pub use workflow_dispatch::{DISPATCH_ACTION_ID, DispatchWorkflowAction, WorkflowDispatchInput};
