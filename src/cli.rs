//! Command-line interface definitions for tadnews_feed.
//!
//! Every option is optional. Anything not given here falls back to the
//! settings file (if any) and then to the built-in defaults; see
//! [`crate::config`].

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the announcement scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape the built-in pages into public/data/announcements.json
/// tadnews_feed
///
/// # Custom pages and output
/// tadnews_feed -o site/data/announcements.json \
///     -s "https://school.example/modules/tadnews/index.php?ncsn=1&g2p=1" \
///     -s "https://school.example/modules/tadnews/index.php?ncsn=1&g2p=2"
///
/// # Settings from a YAML file
/// tadnews_feed --config tadnews.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, env = "TADNEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output path of the JSON feed
    #[arg(short, long, env = "TADNEWS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Listing page URL to scrape; repeat for several pages, in order
    #[arg(short, long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "TADNEWS_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}
