//! CLI presenter for output formatting

use colored::*;

use crate::application::{CaptureReport, TickOutcome};

/// Presenter for CLI output formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print listener status
    pub fn listener_status(&self, state: &str) {
        eprintln!("{} Listener: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Report the capture side of a processed tick
    pub fn tick(&self, outcome: &TickOutcome) {
        let TickOutcome::Processed(report) = outcome else {
            return;
        };
        match &report.capture {
            CaptureReport::Idle => {}
            CaptureReport::Started(name) => {
                eprintln!("{} Recording {}", "●".red(), name);
            }
            CaptureReport::Committed(recording) => {
                self.success(&format!("Saved {}", recording.handle()));
            }
            CaptureReport::StartFailed(e) => {
                self.warn(&format!("Could not start recording: {}", e));
            }
            CaptureReport::StopFailed(e) => {
                self.warn(&format!("Could not stop recording: {}", e));
            }
        }
    }
}
