//! Error handling for the ATS analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsError {
    #[error("Please upload a resume first")]
    MissingFile,

    #[error("Please upload a PDF, DOC, or DOCX file (got {0})")]
    UnsupportedType(String),

    #[error("File size should not exceed {}MB (file is {size} bytes)", .limit / (1024 * 1024))]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Please provide a job description")]
    MissingDescription,

    #[error("{0}")]
    AnalysisFailed(String),

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl AtsError {
    /// Errors raised by the submission stage. These are shown to the user
    /// through the notifier before they are returned.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            AtsError::MissingFile
                | AtsError::UnsupportedType(_)
                | AtsError::FileTooLarge { .. }
                | AtsError::MissingDescription
                | AtsError::AnalysisFailed(_)
                | AtsError::AnalysisInFlight
        )
    }
}

pub type Result<T> = std::result::Result<T, AtsError>;
