//! tadnews listing page parser.
//!
//! The school site runs the XOOPS `tadnews` module. Its listing pages render
//! announcements as a striped Bootstrap table:
//!
//! ```text
//! table.table-striped
//! └── tbody
//!     └── tr
//!         └── td   "2024-10-01 <a class="badge">置頂</a> <a href="index.php?nsn=123">Title</a>"
//! ```
//!
//! Each row yields at most one [`AnnouncementRecord`]. Badge links (category
//! and pin labels) are skipped when choosing the row's link.

use crate::models::AnnouncementRecord;
use crate::utils::char_prefix;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.table-striped").expect("static selector"));
static TBODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody").expect("static selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("static selector"));

/// Leading characters of the cell text taken as the date.
const DATE_LEN: usize = 10;

/// Class marking decorative label links.
const BADGE_CLASS: &str = "badge";

const TBODY_TAG: &[u8] = b"<tbody";

/// Extract announcement records from one listing page.
///
/// Structural problems are not errors: a page without the striped table or
/// its body yields no records, and rows without a cell or without a
/// non-badge link are skipped. Each case is logged.
///
/// When several striped tables exist, the first in document order is used.
///
/// # Arguments
///
/// * `document` - Raw HTML of the listing page
/// * `source_url` - URL the page was fetched from; base for relative links
///
/// # Returns
///
/// One record per qualifying row, in row order.
#[instrument(level = "info", skip_all, fields(%source_url))]
pub fn extract(document: &str, source_url: &str) -> Vec<AnnouncementRecord> {
    let base = match Url::parse(source_url) {
        Ok(base) => base,
        Err(e) => {
            warn!(error = %e, "Source page URL is not absolute; skipping page");
            return Vec::new();
        }
    };

    let html = Html::parse_document(document);

    let Some(table) = html.select(&TABLE_SELECTOR).next() else {
        warn!("No table.table-striped on page");
        return Vec::new();
    };

    // The HTML5 parser synthesises a tbody for any table with rows, so a
    // tbody only counts if the markup itself spells one out.
    let tbody = match table.select(&TBODY_SELECTOR).next() {
        Some(tbody) if has_literal_tbody(document) => tbody,
        _ => {
            warn!("Announcement table has no tbody");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    let rows = tbody
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr");

    for (index, row) in rows.enumerate() {
        match extract_row(row, &base, source_url) {
            Some(record) => records.push(record),
            None => debug!(index, "Row skipped"),
        }
    }

    info!(count = records.len(), "Extracted announcements");
    records
}

/// Build a record from a single table row, or `None` if the row has no cell
/// or no qualifying link.
fn extract_row(row: ElementRef<'_>, base: &Url, source_url: &str) -> Option<AnnouncementRecord> {
    let cell = row.select(&CELL_SELECTOR).next()?;

    let full_text = cell
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ");
    let date = char_prefix(&full_text, DATE_LEN).to_string();

    let link = cell.select(&LINK_SELECTOR).find(is_qualifying_link)?;

    let title = link.text().collect::<String>().trim().to_string();
    let href = link.value().attr("href").unwrap_or("");

    Some(AnnouncementRecord {
        date,
        title,
        url: resolve_href(base, source_url, href),
        source_page: source_url.to_string(),
    })
}

/// Whether the raw markup contains a `<tbody` start tag, in any letter case.
fn has_literal_tbody(document: &str) -> bool {
    document
        .as_bytes()
        .windows(TBODY_TAG.len())
        .any(|w| w.eq_ignore_ascii_case(TBODY_TAG))
}

fn is_qualifying_link(link: &ElementRef<'_>) -> bool {
    !link.value().classes().any(|class| class == BADGE_CLASS)
}

/// Join `href` onto the page URL.
///
/// An empty href is the page itself and returns `source_url` untouched.
/// Unjoinable hrefs are kept verbatim.
fn resolve_href(base: &Url, source_url: &str, href: &str) -> String {
    if href.is_empty() {
        return source_url.to_string();
    }
    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            warn!(%href, error = %e, "Cannot resolve link; keeping raw href");
            href.to_string()
        }
    }
}
