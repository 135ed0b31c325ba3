//! Outbound call to the ATS analysis service

pub mod http;

pub use http::HttpTransport;

use crate::error::Result;
use crate::input::SelectedFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message used when the service gives no usable error text
pub const DEFAULT_FAILURE_MESSAGE: &str = "Analysis failed";

/// Multipart field carrying the resume file
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying the job description text
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file: SelectedFile,
    pub job_description: String,
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub ats_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_job_description: Option<String>,
}

/// Error response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server's message when it sent a non-empty one, else the default
    pub fn message(&self) -> String {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string()
    }
}

/// Performs the single network call of a submission. Every failure is
/// reported as `AtsError::AnalysisFailed`.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
