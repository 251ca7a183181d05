// src/about.rs
//! Console output for the non-wizard subcommands.

use console::style;

use crate::core::ApiClient;

/// Print the product overview shown by `genie about`.
pub fn print_about() {
    let separator = "─".repeat(70);

    println!();
    println!("{}", style("Supercharge Your Resume in Seconds").bold());
    println!("Your personal AI-powered resume assistant.");
    println!("No signup required • 100% free");
    println!("{}", separator);
    println!();

    println!("{}", style("HOW IT WORKS").cyan().bold());
    println!("  1. Upload Your Resume      a PDF is enough to get started");
    println!("  2. AI Enhancement          wording, structure and impact, rewritten");
    println!("  3. Job Tailoring           match against a posting (optional)");
    println!("  4. Download & Apply        a clean, professional PDF");
    println!();

    println!("{}", style("FEATURES").cyan().bold());
    println!("  AI-Powered Enhancement     stronger wording and quantified impact");
    println!("  Job Matching & Analysis    a 0-100 match score with gaps and keywords");
    println!("  Professional PDF           rendered server-side, saved where you choose");
    println!("  Live Preview               edit any field before you download");
    println!("  100% Private & Secure      processed in memory and never stored");
    println!("  Lightning Fast             one session, no account, no waiting room");
    println!();

    println!("{}", style("USAGE").cyan().bold());
    println!("  genie                      run the interactive wizard");
    println!("  genie run --resume cv.pdf  one-shot: upload, polish, save the PDF");
    println!("  genie check                probe the backend");
    println!();
}

/// Probe the backend and report. Returns whether it is healthy, so the
/// caller can set the exit code.
pub async fn cmd_check(client: &ApiClient, backend_url: &str) -> bool {
    println!("Checking {} ...", backend_url);

    match client.health().await {
        Ok(health) => {
            println!(
                "{} {} is {}",
                style("✓").green().bold(),
                health.service,
                health.status
            );
            true
        }
        Err(e) => {
            println!("{} {}", style("✗").red().bold(), e);
            false
        }
    }
}
