//! The error-reporting collaborator: a fire-and-forget sink for failures
//! the synchronizer swallows (toast, telemetry, or just the log).

use crate::api::ApiError;

/// External sink for user-visible failure feedback.
///
/// Implementations must never panic; the synchronizer calls this on its own
/// error paths and has no way to recover from a misbehaving sink.
pub trait ErrorReporter: Send + Sync {
    fn handle_error(&self, error: &ApiError, context: &str);
}

/// Default reporter that forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        LogReporter
    }
}

impl ErrorReporter for LogReporter {
    fn handle_error(&self, error: &ApiError, context: &str) {
        log::error!("{}: {}", context, error);
    }
}
