// src/core/pipeline.rs
//! Non-interactive wizard: upload, polish, optionally analyze, save.
//!
//! Drives the same session machine and API client as the full-screen UI,
//! printing progress to stdout instead of drawing it.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::core::downloads::save_pdf;
use crate::core::service_client::ApiClient;
use crate::core::session::Session;
use crate::error::ValidationError;
use crate::types::analysis::{job_description_chars, MIN_JOB_DESCRIPTION_CHARS};
use crate::utils;

pub struct PipelineOptions {
    pub resume_path: PathBuf,
    pub job_description: Option<String>,
    pub output_dir: PathBuf,
    pub accepted_extensions: Vec<String>,
}

/// Run the whole flow once. Returns the path of the saved PDF.
pub async fn run(client: &ApiClient, options: PipelineOptions) -> Result<PathBuf> {
    let mut session = Session::new();

    // Upload
    utils::validate_upload_file(&options.resume_path, &options.accepted_extensions).await?;
    let file_name = options
        .resume_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Resume path has no file name")?
        .to_string();
    let content = utils::read_file_bytes(&options.resume_path).await?;

    let upload = client.upload_resume(&file_name, content).await?;
    println!(
        "✓ Uploaded {} ({} characters extracted)",
        upload.filename, upload.character_count
    );
    session
        .complete_upload(upload)
        .context("Upload result rejected")?;

    // Polish
    let full_text = session
        .upload()
        .map(|u| u.full_text.clone())
        .context("No uploaded text to polish")?;
    let polish = client.polish_resume(&full_text).await?;
    println!("✓ Polished resume for {}", polish.resume.contact_info.name);
    for improvement in &polish.improvements {
        println!("  - {}", improvement);
    }
    session
        .apply_polish(polish)
        .context("Polish result rejected")?;
    session
        .advance_to_match()
        .context("Cannot continue past the polish step")?;

    // Optional job analysis
    if let Some(job_description) = &options.job_description {
        let count = job_description_chars(job_description);
        if count < MIN_JOB_DESCRIPTION_CHARS {
            return Err(ValidationError::JobDescriptionTooShort {
                count,
                minimum: MIN_JOB_DESCRIPTION_CHARS,
            }
            .into());
        }

        let resume = session.resume().context("No resume to analyze")?;
        let analysis = client.analyze_job_match(resume, job_description).await?;
        println!(
            "✓ Match score: {}/100 ({})",
            analysis.match_score,
            analysis.tier().verdict()
        );
        if !analysis.overall_assessment.is_empty() {
            println!("  {}", analysis.overall_assessment);
        }
        for keyword in analysis.missing_keywords.iter().take(5) {
            println!("  missing keyword: {}", keyword);
        }
    }

    session
        .complete_wizard()
        .context("Cannot finish the wizard")?;

    // Download
    let resume = session.resume().context("No resume to render")?;
    let pdf = client.generate_pdf(resume).await?;
    let filename = utils::download_filename(&resume.contact_info.name, "_resume_final.pdf");
    let path = save_pdf(&options.output_dir, &filename, &pdf)?;

    info!("Pipeline finished: {}", path.display());
    println!("✓ Saved {}", path.display());

    Ok(path)
}
