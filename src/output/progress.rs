//! Terminal implementations of the submit control and notifier

use crate::controller::{Notifier, SubmitControl};
use crate::error::AtsError;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown on stderr while the analysis request is in flight
#[derive(Default)]
pub struct SpinnerControl {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl SpinnerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// No terminal output, for piped JSON/HTML runs
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        let mut slot = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut slot);
    }
}

impl SubmitControl for SpinnerControl {
    fn set_busy(&self) {
        let bar = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message("Analyzing...");
        bar.enable_steady_tick(Duration::from_millis(100));

        self.with_bar(|slot| {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        });
    }

    fn set_complete(&self) {
        self.with_bar(|slot| {
            if let Some(bar) = slot.as_ref() {
                bar.finish_with_message("✔ Analysis Complete!");
            }
        });
    }

    fn restore(&self) {
        self.with_bar(|slot| {
            if let Some(bar) = slot.take() {
                if !bar.is_finished() {
                    bar.finish_and_clear();
                }
            }
        });
    }
}

/// Prints notifications to stderr
pub struct ConsoleNotifier {
    verbose: bool,
}

impl ConsoleNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ConsoleNotifier {
    /// Only analysis failures have debug-logged causes worth a rerun
    fn verbose_hint(&self, error: &AtsError) -> Option<&'static str> {
        match error {
            AtsError::AnalysisFailed(_) if !self.verbose => {
                Some("Run with --verbose for more details.")
            }
            _ => None,
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    fn notify_error(&self, error: &AtsError) {
        self.notify(&error.to_string());
        if let Some(hint) = self.verbose_hint(error) {
            eprintln!("{}", hint.bright_black());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_lifecycle() {
        let control = SpinnerControl::hidden();
        control.set_busy();
        assert!(control.bar.lock().unwrap().is_some());

        control.set_complete();
        control.restore();
        assert!(control.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_restore_without_busy_is_noop() {
        let control = SpinnerControl::hidden();
        control.restore();
        assert!(control.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_verbose_hint_only_for_analysis_failures() {
        let notifier = ConsoleNotifier::new(false);
        assert!(notifier
            .verbose_hint(&AtsError::AnalysisFailed("Analysis failed".into()))
            .is_some());
        assert!(notifier.verbose_hint(&AtsError::MissingDescription).is_none());
        assert!(notifier.verbose_hint(&AtsError::MissingFile).is_none());

        let verbose = ConsoleNotifier::new(true);
        assert!(verbose
            .verbose_hint(&AtsError::AnalysisFailed("Analysis failed".into()))
            .is_none());
    }
}
