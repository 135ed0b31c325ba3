//! reqwest-backed transport posting the multipart form

use crate::client::{
    AnalysisRequest, AnalysisResponse, AnalysisTransport, ErrorBody, DEFAULT_FAILURE_MESSAGE,
    JOB_DESCRIPTION_FIELD, RESUME_FIELD,
};
use crate::error::{AtsError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// `timeout` of `None` lets a request wait forever
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            AtsError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn build_form(request: AnalysisRequest) -> Result<Form> {
        let file = request.file;
        let part = Part::stream_with_length(Body::from(file.data().clone()), file.size())
            .file_name(file.name().to_string())
            .mime_str(file.media_type().mime())
            .map_err(|e| AtsError::InvalidInput(format!("Invalid media type: {}", e)))?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, request.job_description))
    }
}

fn analysis_failed() -> AtsError {
    AtsError::AnalysisFailed(DEFAULT_FAILURE_MESSAGE.to_string())
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let form = Self::build_form(request)?;
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                debug!("Request to {} failed: {}", self.endpoint, e);
                analysis_failed()
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.unwrap_or_default();
            debug!("Analysis service returned {}: {:?}", status, body.error);
            return Err(AtsError::AnalysisFailed(body.message()));
        }

        response.json::<AnalysisResponse>().await.map_err(|e| {
            debug!("Malformed analysis response: {}", e);
            analysis_failed()
        })
    }
}
