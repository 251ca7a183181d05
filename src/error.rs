// src/error.rs
//! Error taxonomy for the wizard.
//!
//! Three families with different recovery stories: validation errors are
//! raised before any request leaves the machine, API errors cover the
//! request itself, and edit errors cover stale field addresses. Every
//! Display string is written to be shown to the user as-is.

use thiserror::Error;

/// Client-side checks that failed before a request was made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported file type .{extension}. Accepted: {allowed}")]
    UnsupportedType { extension: String, allowed: String },

    #[error("File has no extension. Accepted: {allowed}")]
    MissingExtension { allowed: String },

    #[error("File is too large: {size_mb:.1} MB (limit is {limit_mb} MB)")]
    Oversized { size_mb: f64, limit_mb: u64 },

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Job description is too short: {count} of {minimum} characters")]
    JobDescriptionTooShort { count: usize, minimum: usize },
}

/// Failures while talking to the backend. One attempt per trigger, no
/// retries, so each variant maps to exactly one user-visible outcome.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, DNS, broken pipe.
    #[error("Cannot reach the backend: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `detail` is the
    /// server's own message, surfaced verbatim.
    #[error("{detail}")]
    Status { status: u16, detail: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("The backend sent a response this client could not understand")]
    Malformed(#[source] serde_json::Error),

    /// A well-formed envelope whose status field reports failure.
    #[error("The backend reported a failure: {0}")]
    Backend(String),
}

impl ApiError {
    /// Non-2xx responses carry a JSON `{"detail": "..."}` body. Fall back
    /// to the raw body when it is not JSON, and to the status code when
    /// the body is empty.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<crate::types::response::ErrorBody>(body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("The backend returned status {}", status)
                } else {
                    body.trim().to_string()
                }
            });
        ApiError::Status { status, detail }
    }
}

/// A typed field edit addressed an entry that no longer exists.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("No {section} entry at position {index}")]
    StaleIndex { section: &'static str, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_extracts_detail() {
        let err = ApiError::from_status(400, r#"{"detail": "Only PDF files are allowed"}"#);
        assert_eq!(err.to_string(), "Only PDF files are allowed");
        match err {
            ApiError::Status { status, .. } => assert_eq!(status, 400),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = ApiError::from_status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_status_error_falls_back_to_code_on_empty_body() {
        let err = ApiError::from_status(500, "   ");
        assert_eq!(err.to_string(), "The backend returned status 500");
    }

    #[test]
    fn test_validation_messages_are_presentable() {
        let err = ValidationError::UnsupportedType {
            extension: "docx".to_string(),
            allowed: "pdf".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported file type .docx. Accepted: pdf");

        let err = ValidationError::JobDescriptionTooShort {
            count: 12,
            minimum: 50,
        };
        assert_eq!(
            err.to_string(),
            "Job description is too short: 12 of 50 characters"
        );
    }
}
