use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a filings request is in flight.
pub struct FetchSpinner {
    progress_bar: ProgressBar,
}

impl FetchSpinner {
    pub fn start(message: &str) -> Self {
        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            progress_bar.set_style(style);
        }
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        Self { progress_bar }
    }

    pub fn finish(self, message: &str) {
        self.progress_bar.finish_with_message(message.to_string());
    }

    pub fn abandon(self, message: &str) {
        self.progress_bar.abandon_with_message(message.to_string());
    }
}
