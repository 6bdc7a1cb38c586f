use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use survey_core::{ProgressSink, TracingProgress};

/// Spinner showing the latest sync status line.
///
/// Hidden in quiet mode, where messages go to [`TracingProgress`] instead.
pub struct SpinnerProgress {
    bar: Option<ProgressBar>,
}

impl SpinnerProgress {
    #[must_use]
    pub fn new(message: &str, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }
}

impl ProgressSink for SpinnerProgress {
    fn report(&self, message: &str) {
        match &self.bar {
            Some(bar) => {
                tracing::debug!(target: "survey_sync::progress", "{message}");
                bar.set_message(message.to_string());
            }
            None => TracingProgress.report(message),
        }
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}
