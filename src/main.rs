//! # upfc_rss
//!
//! Generates an RSS 2.0 feed for a news listing page that has none.
//!
//! ## Usage
//!
//! ```sh
//! upfc_rss > hello_project.xml
//! ```
//!
//! ## Architecture
//!
//! A single sequential pass:
//! 1. **Fetching**: download the listing page ([`scrapers`])
//! 2. **Extraction**: pull one raw entry per list item ([`scrapers::listing`])
//! 3. **Normalization**: absolute links, timezone-aware dates, display titles ([`normalize`])
//! 4. **Output**: assemble the channel ([`feed`]) and serialize it as RSS ([`outputs::rss`])
//!
//! The feed is the only thing written to stdout. Logs go to stderr.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod feed;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::{FeedConfig, load_config};
use error::FeedError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let rss = match generate(&args).await {
        Ok(rss) => rss,
        Err(e) => {
            error!(error = %e, "Feed generation failed");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_feed(&rss) {
        error!(error = %e, "Failed writing feed to stdout");
        return ExitCode::FAILURE;
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, bytes = rss.len(), "Execution complete");
    ExitCode::SUCCESS
}

fn write_feed(rss: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rss)?;
    stdout.flush()
}

/// Resolve the configuration and run the pipeline once.
#[instrument(level = "info", skip_all)]
async fn generate(args: &Cli) -> Result<Vec<u8>, FeedError> {
    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => {
            info!(preset = ?args.preset, "Using built-in preset");
            FeedConfig::preset(args.preset)
        }
    };
    let compiled = config.compile()?;

    match &args.html {
        Some(path) => {
            let body = scrapers::read_page_file(path).await?;
            pipeline::build_from_html(&body, &compiled)
        }
        None => pipeline::run(&compiled).await,
    }
}
