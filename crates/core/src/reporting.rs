//! Human-readable progress output
//!
//! Flows narrate their steps through a [`ProgressReporter`] rather than
//! printing, so the binary decides where lines go and tests can capture them.

/// Sink for progress lines
pub trait ProgressReporter: Send + Sync {
    /// Emit one line of progress.
    fn line(&self, message: &str);
}

/// Reporter that drops every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn line(&self, _message: &str) {}
}
