//! Girder library crate providing GitHub actions for a scaffolding engine.
//!
//! The library wraps Octocrab to parse repository location strings, resolve
//! credentials against configured integrations, and trigger workflow dispatch
//! events with rate-limit aware retries. Actions implement the
//! [`scaffolder::TemplateAction`] contract, so a template-execution engine can
//! resolve them from an [`scaffolder::ActionRegistry`] and invoke them as
//! steps of a provisioning run.

pub mod config;
pub mod github;
pub mod scaffolder;

pub use config::GirderConfig;
pub use github::{
    DISPATCH_ACTION_ID, DispatchError, DispatchWorkflowAction, GitHubIntegration,
    IntegrationRegistry, OctocrabDispatchGateway, PersonalAccessToken, RepositoryLocator,
    ThrottlePolicy, WorkflowDispatch, WorkflowDispatchGateway, WorkflowDispatchInput,
};
pub use scaffolder::{
    ActionContext, ActionLogger, ActionRegistry, NoopLogger, TemplateAction, TracingLogger,
};
