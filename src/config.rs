// src/config.rs
//! Runtime configuration: environment variables first, CLI flags on top.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILE: &str = "/tmp/genie.log";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend, normalized without a trailing slash.
    pub backend_url: String,
    /// Extensions the upload picker offers, lowercase without dots.
    pub accepted_extensions: Vec<String>,
    /// Where downloaded PDFs land.
    pub output_dir: PathBuf,
    /// Directory the upload picker starts in.
    pub resume_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self> {
        let backend_url = std::env::var("GENIE_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let accepted = std::env::var("GENIE_ACCEPTED_TYPES")
            .unwrap_or_else(|_| crate::utils::DEFAULT_ACCEPTED_EXTENSIONS.join(","));

        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let output_dir = std::env::var("GENIE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| cwd.clone());

        let config = Self {
            backend_url: normalize_base_url(&backend_url),
            accepted_extensions: parse_accepted_types(&accepted),
            output_dir,
            resume_dir: cwd,
        };
        info!("Backend: {}", config.backend_url);

        Ok(config)
    }

    pub fn with_backend_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.backend_url = normalize_base_url(url);
        }
        self
    }

    pub fn with_accepted_types(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            let parsed = parse_accepted_types(raw);
            if !parsed.is_empty() {
                self.accepted_extensions = parsed;
            }
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn with_resume_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.resume_dir = dir;
        }
        self
    }

    /// The accepted set as shown in prompts, e.g. "pdf, docx".
    pub fn accepted_display(&self) -> String {
        self.accepted_extensions.join(", ")
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Parse a comma-separated extension list, tolerating dots and mixed case.
fn parse_accepted_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().trim_start_matches('.').to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("  http://localhost:8000  "),
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_parse_accepted_types() {
        assert_eq!(parse_accepted_types("pdf"), vec!["pdf"]);
        assert_eq!(
            parse_accepted_types(".PDF, docx , txt"),
            vec!["pdf", "docx", "txt"]
        );
        assert!(parse_accepted_types(" , ,").is_empty());
    }
}
