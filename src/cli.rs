// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "genie")]
#[command(about = "Resume Genie: AI resume polish and job matching from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Backend base URL (overrides GENIE_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Comma-separated accepted upload extensions, e.g. "pdf,docx"
    #[arg(long, global = true)]
    pub accept: Option<String>,

    /// Directory downloaded PDFs are saved to
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Directory the upload picker starts in
    #[arg(long, global = true)]
    pub resume_dir: Option<PathBuf>,

    /// Log file path (overrides GENIE_LOG_FILE)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the whole flow once without the full-screen UI
    Run {
        /// Resume file to upload
        #[arg(long)]
        resume: PathBuf,

        /// File holding the job description to match against
        #[arg(long)]
        job: Option<PathBuf>,
    },
    /// Probe the backend health endpoint
    Check,
    /// What Resume Genie is and how the flow works
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_the_wizard() {
        let cli = Cli::try_parse_from(["genie"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.backend_url.is_none());
    }

    #[test]
    fn test_run_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "genie",
            "run",
            "--resume",
            "cv.pdf",
            "--job",
            "posting.txt",
            "--backend-url",
            "http://localhost:9000",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Run { resume, job }) => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job, Some(PathBuf::from("posting.txt")));
            }
            _ => panic!("expected run subcommand"),
        }
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_check_subcommand_parses() {
        let cli = Cli::try_parse_from(["genie", "check"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Check)));
    }
}
