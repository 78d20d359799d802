//! Batch orchestration: fetch every source page in order, extract its
//! announcements, and write the feed once at the end.
//!
//! Pages are processed strictly one after another. A page that fails to
//! fetch is logged and contributes nothing; it never stops the batch. If no
//! page produced any record, the existing feed is left untouched.

use crate::models::AnnouncementRecord;
use crate::outputs::json;
use crate::scrapers::fetch::PageSource;
use crate::scrapers::tadnews;
use futures::stream::{self, StreamExt};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The feed was written with `count` records.
    Written { count: usize, path: PathBuf },
    /// Nothing was collected, so nothing was written.
    NothingCollected,
}

/// Fetch and extract every page in `sources`, in order.
///
/// # Returns
///
/// All records, grouped by page in `sources` order and in row order within
/// each page.
#[instrument(level = "info", skip_all, fields(pages = sources.len()))]
pub async fn run<S: PageSource>(sources: &[String], fetcher: &S) -> Vec<AnnouncementRecord> {
    let pages: Vec<Vec<AnnouncementRecord>> = stream::iter(sources)
        .then(|url| async move {
            match fetcher.fetch(url).await {
                Ok(html) => {
                    let records = tadnews::extract(&html, url);
                    info!(%url, count = records.len(), "Scraped listing page");
                    records
                }
                Err(e) => {
                    error!(error = %e, url = %e.url(), "Fetch failed; skipping page");
                    Vec::new()
                }
            }
        })
        .collect()
        .await;

    let records: Vec<AnnouncementRecord> = pages.into_iter().flatten().collect();
    info!(count = records.len(), "Collected announcements");
    records
}

/// Run the batch and persist the result to `output`.
///
/// The feed is only written when at least one record was collected.
///
/// # Errors
///
/// Returns an error if the feed cannot be written. Fetch and page structure
/// failures never surface here.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub async fn run_and_save<S: PageSource>(
    sources: &[String],
    fetcher: &S,
    output: &Path,
) -> Result<RunOutcome, Box<dyn Error>> {
    let records = run(sources, fetcher).await;

    if records.is_empty() {
        warn!("No announcements collected; leaving output untouched");
        return Ok(RunOutcome::NothingCollected);
    }

    json::write_announcements(&records, output).await?;
    Ok(RunOutcome::Written {
        count: records.len(),
        path: output.to_path_buf(),
    })
}
