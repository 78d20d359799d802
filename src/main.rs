//! # tadnews_feed
//!
//! Scrapes a school's paginated `tadnews` announcement listings and writes
//! them as a JSON data feed for the school website.
//!
//! ## Usage
//!
//! ```sh
//! tadnews_feed -o public/data/announcements.json
//! ```
//!
//! ## Architecture
//!
//! The application is a single sequential pass:
//! 1. **Fetching**: Download each configured listing page, in order
//! 2. **Extracting**: Pull `{date, title, url, source_page}` from each row
//! 3. **Output**: Write every collected record to one JSON file
//!
//! ## Exit Codes
//!
//! - `0`: the feed was written
//! - `1`: settings could not be resolved or the feed could not be written
//! - `2`: no announcements were collected; the previous feed is untouched

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use pipeline::RunOutcome;
use scrapers::fetch::HttpFetcher;

/// Exit status when the run finished but had nothing to write.
const EXIT_NOTHING_COLLECTED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("tadnews_feed starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Cannot resolve settings");
            return Err(e.into());
        }
    };

    let fetcher = HttpFetcher::new(settings.timeout())?;

    let outcome =
        match pipeline::run_and_save(&settings.sources, &fetcher, &settings.output).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(path = %settings.output.display(), error = %e, "Failed to write announcements feed");
                return Err(e);
            }
        };

    let elapsed = start_time.elapsed();
    match outcome {
        RunOutcome::Written { count, path } => {
            info!(
                count,
                path = %path.display(),
                ?elapsed,
                "Execution complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::NothingCollected => {
            warn!(?elapsed, "Execution complete; nothing written");
            Ok(ExitCode::from(EXIT_NOTHING_COLLECTED))
        }
    }
}
