//! Progress reporting functionality
//!
//! Spinners for discovery and per-target traversal, hidden in quiet mode or
//! when progress output is disabled.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    enabled: bool,
    multi_progress: MultiProgress,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool, show_progress: bool) -> Self {
        Self {
            enabled: !quiet && show_progress,
            multi_progress: MultiProgress::new(),
        }
    }

    /// A reporter that never draws anything
    pub fn hidden() -> Self {
        Self::new(true, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create a spinner for one operation
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        Some(spinner)
    }

    /// Clear a spinner created by [`create_spinner`](Self::create_spinner)
    pub fn finish_spinner(spinner: Option<ProgressBar>) {
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }
}
