// src/types/response.rs
//! Wire envelopes for the backend API. Every success envelope carries a
//! `status` field; error bodies carry a `detail` string.

use serde::{Deserialize, Serialize};

use crate::types::analysis::JobAnalysis;
use crate::types::resume::ResumeData;

// ===== Service Response Types =====

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub filename: String,
    pub text_preview: String,
    pub full_text: String,
    pub character_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PolishResponse {
    pub status: String,
    pub original_text: String,
    pub polished_content: ResumeData,
    #[serde(default)]
    pub improvements_made: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub analysis: JobAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Shape of FastAPI-style error bodies.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

// ===== Session-held results =====

/// What survives from a successful upload: the extracted text and its
/// provenance. Immutable once created; dropped on wizard reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub text_preview: String,
    pub full_text: String,
    pub character_count: usize,
}

impl From<UploadResponse> for UploadResult {
    fn from(r: UploadResponse) -> Self {
        Self {
            filename: r.filename,
            text_preview: r.text_preview,
            full_text: r.full_text,
            character_count: r.character_count,
        }
    }
}

/// A polish result: the rewritten resume plus the service's own list of
/// what it changed.
#[derive(Debug, Clone)]
pub struct PolishResult {
    pub resume: ResumeData,
    pub improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_envelope_parses_backend_shape() {
        let json = r#"{
            "status": "success",
            "filename": "resume.pdf",
            "text_preview": "John Smith...",
            "full_text": "John Smith\nSummary: builder",
            "character_count": 28
        }"#;
        let parsed: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.character_count, 28);

        let result = UploadResult::from(parsed);
        assert_eq!(result.filename, "resume.pdf");
    }

    #[test]
    fn test_polish_envelope_defaults_improvements() {
        let json = r#"{
            "status": "success",
            "original_text": "raw",
            "polished_content": {
                "contact_info": {"name": "Jane Smith"},
                "summary": "Engineer"
            }
        }"#;
        let parsed: PolishResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.improvements_made.is_empty());
        assert_eq!(parsed.polished_content.contact_info.name, "Jane Smith");
    }

    #[test]
    fn test_error_body_parses_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Only PDF files are allowed"}"#).unwrap();
        assert_eq!(body.detail, "Only PDF files are allowed");
    }
}
