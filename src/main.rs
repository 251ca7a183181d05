use anyhow::{Context, Result};
use clap::Parser;
use resume_genie::about;
use resume_genie::cli::{Cli, Command};
use resume_genie::config::{Config, DEFAULT_LOG_FILE};
use resume_genie::core::pipeline::{self, PipelineOptions};
use resume_genie::core::ApiClient;
use resume_genie::tui;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logging goes to a file: the terminal belongs to the wizard.
    init_logging(cli.log_file.clone())?;

    let config = Config::load()?
        .with_backend_url(cli.backend_url.as_deref())
        .with_accepted_types(cli.accept.as_deref())
        .with_output_dir(cli.output_dir.clone())
        .with_resume_dir(cli.resume_dir.clone());

    match cli.command {
        None => tui::run(config).await,
        Some(Command::Run { resume, job }) => {
            let job_description = match job {
                Some(path) => Some(
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Cannot read job description {}", path.display()))?,
                ),
                None => None,
            };

            let client = ApiClient::new(config.backend_url.clone());
            let options = PipelineOptions {
                resume_path: resume,
                job_description,
                output_dir: config.output_dir.clone(),
                accepted_extensions: config.accepted_extensions.clone(),
            };
            pipeline::run(&client, options).await?;
            Ok(())
        }
        Some(Command::Check) => {
            let client = ApiClient::new(config.backend_url.clone());
            let healthy = about::cmd_check(&client, &config.backend_url).await;
            if !healthy {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::About) => {
            about::print_about();
            Ok(())
        }
    }
}

fn init_logging(log_file: Option<PathBuf>) -> Result<()> {
    let path = log_file
        .or_else(|| std::env::var("GENIE_LOG_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("info".parse().expect("Invalid log directive")),
        )
        .init();

    info!("Logging to {}", path.display());
    Ok(())
}
