//! Submission controller: holds the selected resume and drives one analysis
//! from validation through the network call to the interpreted report.

use crate::client::{AnalysisRequest, AnalysisTransport};
use crate::error::{AtsError, Result};
use crate::input::selection::{validate_file, validate_submission};
use crate::input::SelectedFile;
use crate::report::{AnalysisReport, ReportInterpreter};
use log::{debug, info};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// The control that starts an analysis (a button in a UI, a spinner on a terminal)
pub trait SubmitControl: Send + Sync {
    /// Disabled, showing progress
    fn set_busy(&self);
    /// Briefly shows that the analysis finished
    fn set_complete(&self);
    /// Enabled, default label
    fn restore(&self);
}

/// Blocking user notification for validation and analysis errors
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);

    fn notify_error(&self, error: &AtsError) {
        self.notify(&error.to_string());
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: AnalysisReport,
    pub parsed_resume: Option<String>,
    pub parsed_job_description: Option<String>,
}

pub struct AnalyzeController<T, C, N> {
    transport: T,
    control: C,
    notifier: N,
    interpreter: ReportInterpreter,
    max_file_bytes: u64,
    selected: Mutex<Option<SelectedFile>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag and restores the control on every exit path
struct BusyGuard<'a, C: SubmitControl> {
    control: &'a C,
    in_flight: &'a AtomicBool,
}

impl<C: SubmitControl> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.restore();
        self.in_flight.store(false, Ordering::Release);
    }
}

impl<T, C, N> AnalyzeController<T, C, N>
where
    T: AnalysisTransport,
    C: SubmitControl,
    N: Notifier,
{
    pub fn new(transport: T, control: C, notifier: N, max_file_bytes: u64) -> Self {
        Self {
            transport,
            control,
            notifier,
            interpreter: ReportInterpreter::new(),
            max_file_bytes,
            selected: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Replace the selected file. An invalid file is rejected and the
    /// previous selection is kept.
    pub fn select_file(&self, file: SelectedFile) -> Result<()> {
        if let Err(e) = validate_file(&file, self.max_file_bytes) {
            return Err(self.report_error(e));
        }

        info!("Selected {} ({} bytes)", file.name(), file.size());
        *self.lock_selected() = Some(file);
        Ok(())
    }

    /// Load and select a file from disk. Type and size are checked before
    /// the file is read.
    pub async fn select_path(&self, path: &Path, declared_mime: Option<&str>) -> Result<()> {
        match SelectedFile::from_path(path, declared_mime, Some(self.max_file_bytes)).await {
            Ok(file) => self.select_file(file),
            Err(e) if e.is_submission_error() => Err(self.report_error(e)),
            Err(e) => Err(e),
        }
    }

    pub fn remove_file(&self) -> Option<SelectedFile> {
        self.lock_selected().take()
    }

    pub fn selected_file(&self) -> Option<SelectedFile> {
        self.lock_selected().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Validate, send the selected file with `job_description`, and interpret
    /// the returned report. At most one submission runs at a time.
    pub async fn submit(&self, job_description: &str) -> Result<AnalysisOutcome> {
        let file = self.selected_file();
        if let Err(e) = validate_submission(file.as_ref(), job_description, self.max_file_bytes) {
            return Err(self.report_error(e));
        }
        let file = file.ok_or(AtsError::MissingFile)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(self.report_error(AtsError::AnalysisInFlight));
        }

        self.control.set_busy();
        let _guard = BusyGuard {
            control: &self.control,
            in_flight: &self.in_flight,
        };

        debug!("Submitting {} for analysis", file.name());
        let request = AnalysisRequest {
            file,
            job_description: job_description.to_string(),
        };

        let response = match self.transport.analyze(request).await {
            Ok(response) => response,
            Err(e) => return Err(self.report_error(e)),
        };

        self.control.set_complete();
        let report = self.interpreter.interpret(&response.ats_result);
        info!("Analysis complete: {}% match", report.match_percentage);

        Ok(AnalysisOutcome {
            report,
            parsed_resume: response.parsed_resume,
            parsed_job_description: response.parsed_job_description,
        })
    }

    fn report_error(&self, error: AtsError) -> AtsError {
        self.notifier.notify_error(&error);
        error
    }

    fn lock_selected(&self) -> std::sync::MutexGuard<'_, Option<SelectedFile>> {
        // A poisoned slot still holds a valid Option
        self.selected.lock().unwrap_or_else(|e| e.into_inner())
    }
}
