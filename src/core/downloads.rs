// src/core/downloads.rs
//! Saving PDF blobs to disk.
//!
//! Bytes go through a named temporary file in the destination directory
//! and are persisted into place. A failed write never leaves a partial
//! download behind, and the temporary name is released exactly once on
//! both the success and the failure path.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Write `bytes` to `dir/filename` and return the final path. An existing
/// file is never overwritten; a timestamped variant is used instead.
pub fn save_pdf(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let target = unique_target(dir, filename);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(bytes).context("Failed to write PDF bytes")?;
    tmp.persist(&target)
        .with_context(|| format!("Failed to move PDF into place: {}", target.display()))?;

    info!("Saved PDF: {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}

fn unique_target(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
    dir.join(format!(
        "{}_{}.pdf",
        stem,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}
