use dancefloor_core::ProgressReporter;

/// Writes progress lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl ProgressReporter for StdoutReporter {
    fn line(&self, message: &str) {
        println!("{message}");
    }
}
