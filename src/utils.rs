// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::error::ValidationError;

/// Upload size limit enforced before any bytes leave the machine.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// File types the wizard will offer for upload when not overridden.
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &["pdf"];

/// Turn a person's name into a filename stem: lowercase, punctuation
/// dropped, whitespace runs collapsed to a single underscore. Underscores
/// survive so the function is idempotent.
pub fn sanitize_name_for_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    kept.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Build a download filename from the resume owner's name and a suffix
/// like `_resume.pdf`.
pub fn download_filename(name: &str, suffix: &str) -> String {
    format!("{}{}", sanitize_name_for_filename(name), suffix)
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against the accepted set
pub fn validate_file_extension(filename: &str, allowed: &[String]) -> Result<(), ValidationError> {
    let allowed_display = allowed.join(", ");
    let ext = get_file_extension(filename).ok_or(ValidationError::MissingExtension {
        allowed: allowed_display.clone(),
    })?;

    if !allowed.iter().any(|a| a == &ext) {
        return Err(ValidationError::UnsupportedType {
            extension: ext,
            allowed: allowed_display,
        });
    }

    Ok(())
}

/// Validate file size against the upload limit
pub fn validate_file_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::Oversized {
            size_mb: size as f64 / (1024.0 * 1024.0),
            limit_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

/// Run every client-side check on an upload candidate: extension in the
/// accepted set, file readable, size under the limit.
pub async fn validate_upload_file(path: &Path, allowed: &[String]) -> Result<(), ValidationError> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    validate_file_extension(filename, allowed)?;

    let metadata =
        tokio::fs::metadata(path)
            .await
            .map_err(|e| ValidationError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

    validate_file_size(metadata.len())
}

/// List files in a directory matching the accepted extensions, sorted by
/// name. Feeds the upload picker.
pub fn list_upload_candidates(dir: &Path, allowed: &[String]) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    if !dir.exists() {
        return Ok(candidates);
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if validate_file_extension(name, allowed).is_ok() {
                candidates.push(path);
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Read the bytes of an upload candidate with error context
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
