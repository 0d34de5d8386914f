//! Spinner shown on stderr while a stage's store request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A spinner that renders only when progress output was requested.
pub struct StageSpinner {
    bar: Option<ProgressBar>,
}

impl StageSpinner {
    pub fn start(enabled: bool, message: String) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
