//! JSON feed output.
//!
//! The feed is a single pretty-printed array of [`AnnouncementRecord`]
//! objects, rewritten in full on every successful run:
//!
//! ```json
//! [
//!   {
//!     "date": "2024-10-01",
//!     "title": "段考公告",
//!     "url": "https://www.example.edu.tw/modules/tadnews/index.php?nsn=123",
//!     "source_page": "https://www.example.edu.tw/modules/tadnews/index.php?ncsn=1&g2p=1"
//!   }
//! ]
//! ```
//!
//! Indentation is two spaces and non-ASCII text is written literally, so the
//! output is stable byte-for-byte for identical input.

use crate::models::AnnouncementRecord;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the announcements feed to `path`, creating parent directories.
///
/// Any existing file is replaced.
///
/// # Arguments
///
/// * `records` - Announcements in output order
/// * `path` - Destination file
///
/// # Returns
///
/// `Ok(())` on success, or an error if directory creation, serialization or
/// the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_announcements(
    records: &[AnnouncementRecord],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        info!(dir = %dir.display(), "Ensuring output directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!(count = records.len(), "Wrote announcements feed");

    Ok(())
}

/// Read a previously written feed back into memory.
#[cfg(test)]
pub async fn read_announcements(path: &Path) -> Result<Vec<AnnouncementRecord>, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
