//! Loading indicator shown while a response is awaited

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner displayed between a submission and its first fragment.
///
/// Draws to stderr and hides itself when stderr is not a terminal.
pub struct ResponseSpinner {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ResponseSpinner {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Start spinning (no-op when already running or disabled).
    pub fn start(&mut self) {
        if !self.enabled || self.bar.is_some() {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::style());
        bar.set_message("Waiting for response...");
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Stop and erase the spinner.
    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    pub fn is_running(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for ResponseSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}
