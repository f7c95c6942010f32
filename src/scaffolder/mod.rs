//! The seam between this crate and the surrounding template engine.
//!
//! A scaffolding run executes a sequence of named actions. The engine
//! resolves each step against an [`ActionRegistry`], validates the step's
//! input, and invokes [`TemplateAction::execute`] with an [`ActionContext`]
//! carrying the input and the run's logger.

pub mod action;
pub mod logger;
pub mod registry;

pub use action::{ActionContext, TemplateAction};
#[cfg(any(test, feature = "test-support"))]
pub use logger::RecordingLogger;
pub use logger::{ActionLogger, NoopLogger, TracingLogger};
pub use registry::ActionRegistry;
