//! Logging collaborator handed to executing actions.
//!
//! Actions never log through ambient global state; the engine passes a logger
//! into the [`crate::scaffolder::ActionContext`] so tests can substitute a
//! recording double and assert on the exact messages emitted.

/// A logger that records informational progress messages for a template run.
pub trait ActionLogger: Send + Sync {
    /// Records an informational message.
    fn info(&self, message: &str);
}

/// Logger that forwards messages to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ActionLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Logger that drops all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl ActionLogger for NoopLogger {
    fn info(&self, _message: &str) {}
}

/// Logger that keeps every message for later inspection.
///
/// Intended for tests; enable the `test-support` feature to use it from an
/// integration suite.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingLogger {
    /// Returns the messages recorded so far, in emission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("messages mutex should be available")
            .clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl ActionLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.messages
            .lock()
            .expect("messages mutex should be available")
            .push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionLogger, RecordingLogger};

    #[test]
    fn recording_logger_keeps_messages_in_order() {
        let logger = RecordingLogger::default();
        logger.info("first");
        logger.info("second");

        assert_eq!(logger.messages(), vec!["first", "second"]);
    }
}
