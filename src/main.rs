// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and env vars) using clap
// 2. Set up logging to stderr
// 3. Find the markdown files and check every link in them
// 4. Print one annotation (or JSON entry) per problem
// 5. Exit with proper code (0 = all good, 1 = broken links, 2 = error)
//
// Rust concepts used:
// - async/await: file reads and `git ls-files` run on the tokio runtime
// - Result<T, E>: For error handling
// - Streams: links arrive one at a time from scan::link_stream
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - link extraction, classification, suggestions
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - settings derived from the CLI
mod error; // src/error.rs - configuration errors
mod report; // src/report.rs - findings and CI annotations
mod repo; // src/repo/ - file discovery and git-tracked files
mod scan; // src/scan/ - walks files and streams checked links

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Configuration or discovery failed before any link was checked
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries annotations or JSON
//
// RUST_LOG wins when it is set; otherwise --verbose switches to debug.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken or non-relative links found
//   Err = configuration or I/O problem (exit code 2)
async fn run(cli: Cli) -> Result<i32> {
    let settings = Settings::from_cli(cli)?;

    // Links, file patterns and `git ls-files` are all repo-relative
    std::env::set_current_dir(&settings.root)
        .with_context(|| format!("cannot enter repository root {}", settings.root.display()))?;

    handle_check(&settings).await
}

// Checks every link in every matching file and prints the problems
async fn handle_check(settings: &Settings) -> Result<i32> {
    let repo_root = Path::new(".");
    info!("🔍 Checking links in {}", settings.files.join(", "));

    // Listing tracked files is only worth it once something is broken
    let outcome = scan::check_links(repo_root, settings, || repo::tracked_files(repo_root)).await?;

    let output = outcome.render(settings.json)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    info!("📊 {} link(s) checked, {} failure(s)", outcome.checked, outcome.failures);

    Ok(outcome.exit_code())
}
