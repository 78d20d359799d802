//! Data models for scraped announcements.
//!
//! - [`AnnouncementRecord`]: one row of a tadnews listing table, flattened to
//!   the four fields the website's data feed consumes.
//!
//! Field declaration order is the JSON key order of the written feed, so do
//! not reorder the struct fields.

use serde::{Deserialize, Serialize};

/// A single announcement extracted from a listing page.
///
/// # JSON Shape
///
/// ```json
/// {"date": "2024-10-01", "title": "...", "url": "https://...", "source_page": "https://..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnouncementRecord {
    /// First 10 characters of the row's cell text, normally `YYYY-MM-DD`.
    /// Positional only; never parsed as a date.
    pub date: String,
    /// Trimmed text of the first non-badge link in the row.
    pub title: String,
    /// Absolute link target, resolved against `source_page`.
    pub url: String,
    /// The listing page URL this record was extracted from.
    pub source_page: String,
}
