// src/core/service_client.rs
//! HTTP client for the Resume Genie backend.
//!
//! One method per endpoint, one attempt per call. There is no retry and no
//! client-side timeout: polish and analysis wait on a language model, and
//! the backend's own limits decide when to give up.

use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::types::{
    analysis::JobAnalysis,
    response::{AnalyzeResponse, HealthResponse, PolishResponse, UploadResponse},
    resume::ResumeData,
    PolishResult, UploadResult,
};

const UPLOAD_ENDPOINT: &str = "/api/upload";
const POLISH_ENDPOINT: &str = "/api/polish";
const ANALYZE_ENDPOINT: &str = "/api/analyze";
const GENERATE_PDF_ENDPOINT: &str = "/api/generate-pdf";
const HEALTH_ENDPOINT: &str = "/health";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// 1. Upload a resume file, get back the extracted text.
    pub async fn upload_resume(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResult, ApiError> {
        let url = format!("{}{}", self.base_url, UPLOAD_ENDPOINT);

        let form = Form::new().part(
            "file",
            Part::bytes(content)
                .file_name(file_name.to_string())
                .mime_str(content_type_for(file_name))?,
        );

        info!("Uploading {} to {}", file_name, url);

        let response = self.client.post(&url).multipart(form).send().await?;
        let envelope: UploadResponse = Self::parse_success(response).await?;

        if envelope.status == "success" {
            Ok(UploadResult::from(envelope))
        } else {
            Err(ApiError::Backend(envelope.status))
        }
    }

    /// 2. Polish the extracted text into structured resume content.
    pub async fn polish_resume(&self, text: &str) -> Result<PolishResult, ApiError> {
        let url = format!("{}{}", self.base_url, POLISH_ENDPOINT);
        let payload = serde_json::json!({ "text": text });

        info!("Requesting polish for {} characters", text.chars().count());

        let response = self.client.post(&url).json(&payload).send().await?;
        let envelope: PolishResponse = Self::parse_success(response).await?;

        if envelope.status == "success" {
            Ok(PolishResult {
                resume: envelope.polished_content,
                improvements: envelope.improvements_made,
            })
        } else {
            Err(ApiError::Backend(envelope.status))
        }
    }

    /// 3. Score the resume against a job description.
    pub async fn analyze_job_match(
        &self,
        resume: &ResumeData,
        job_description: &str,
    ) -> Result<JobAnalysis, ApiError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let payload = serde_json::json!({
            "resume_content": resume,
            "job_description": job_description,
        });

        info!(
            "Requesting job analysis ({} description characters)",
            job_description.chars().count()
        );

        let response = self.client.post(&url).json(&payload).send().await?;
        let envelope: AnalyzeResponse = Self::parse_success(response).await?;

        if envelope.status == "success" {
            Ok(envelope.analysis)
        } else {
            Err(ApiError::Backend(envelope.status))
        }
    }

    /// 4. Render the resume to PDF. The bytes come back untouched.
    pub async fn generate_pdf(&self, resume: &ResumeData) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base_url, GENERATE_PDF_ENDPOINT);
        let payload = serde_json::json!({ "content": resume });

        info!("Requesting PDF generation");

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            debug!("Received PDF: {} bytes", bytes.len());
            Ok(bytes.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("PDF generation failed with status {}: {}", status, body);
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }

    /// 5. Health probe.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);

        let response = self.client.get(&url).send().await?;
        Self::parse_success(response).await
    }

    /// Shared tail of every JSON call: non-2xx becomes a `Status` error
    /// carrying the server's detail message, a 2xx body that fails to
    /// parse becomes `Malformed`.
    async fn parse_success<R>(response: reqwest::Response) -> Result<R, ApiError>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                error!("Unparseable response body: {}", e);
                ApiError::Malformed(e)
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Backend error response ({}): {}", status, body);
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }
}

/// MIME type sent with the multipart upload.
fn content_type_for(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower_name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("resume.pdf"), "application/pdf");
        assert_eq!(content_type_for("Resume.PDF"), "application/pdf");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("weird.bin"), "application/octet-stream");
    }
}
