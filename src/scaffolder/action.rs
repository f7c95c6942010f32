//! The template-action contract and its execution context.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::github::error::DispatchError;

use super::logger::ActionLogger;

/// Execution context the template engine hands to an action.
///
/// Carries the raw JSON input built from template parameters and the logger
/// for the surrounding run. Input is immutable for the duration of the
/// invocation.
pub struct ActionContext {
    input: serde_json::Value,
    logger: Arc<dyn ActionLogger>,
}

impl ActionContext {
    /// Creates a context from raw input and a logger.
    #[must_use]
    pub fn new(input: serde_json::Value, logger: Arc<dyn ActionLogger>) -> Self {
        Self { input, logger }
    }

    /// Deserialises the raw input into the action's typed input.
    ///
    /// This is the schema-enforcement step: it runs before any handler logic
    /// and rejects missing required fields, wrong types, and unknown fields.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidInput`] when the input does not match
    /// the action's schema.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, DispatchError> {
        serde_json::from_value(self.input.clone()).map_err(|error| DispatchError::InvalidInput {
            message: error.to_string(),
        })
    }

    /// Logger for the surrounding template run.
    #[must_use]
    pub fn logger(&self) -> &dyn ActionLogger {
        self.logger.as_ref()
    }
}

/// A named, schema-validated unit of work invocable by the template engine.
#[async_trait]
pub trait TemplateAction: Send + Sync {
    /// Stable identifier the engine registers the action under.
    fn id(&self) -> &'static str;

    /// Human-readable description shown in the action catalogue.
    fn description(&self) -> &'static str;

    /// Executes the action against validated input.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when input validation fails or the remote
    /// call cannot be completed; all failures bubble to the invoking engine.
    async fn execute(&self, context: &ActionContext) -> Result<(), DispatchError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::ActionContext;
    use crate::github::error::DispatchError;
    use crate::scaffolder::logger::NoopLogger;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    #[serde(deny_unknown_fields)]
    struct SampleInput {
        name: String,
    }

    #[test]
    fn input_deserialises_matching_json() {
        let context = ActionContext::new(
            serde_json::json!({ "name": "demo" }),
            Arc::new(NoopLogger),
        );

        let input: SampleInput = context.input().expect("input should deserialise");
        assert_eq!(input.name, "demo");
    }

    #[test]
    fn unknown_fields_fail_validation() {
        let context = ActionContext::new(
            serde_json::json!({ "name": "demo", "surprise": true }),
            Arc::new(NoopLogger),
        );

        let error = context
            .input::<SampleInput>()
            .expect_err("unknown field should fail");
        assert!(
            matches!(error, DispatchError::InvalidInput { .. }),
            "expected InvalidInput, got {error:?}"
        );
    }

    #[test]
    fn missing_required_fields_fail_validation() {
        let context = ActionContext::new(serde_json::json!({}), Arc::new(NoopLogger));

        let error = context
            .input::<SampleInput>()
            .expect_err("missing field should fail");
        assert!(
            matches!(error, DispatchError::InvalidInput { .. }),
            "expected InvalidInput, got {error:?}"
        );
    }
}
