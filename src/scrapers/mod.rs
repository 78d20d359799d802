//! Listing page scraping.
//!
//! Scraping is split in two steps, mirrored by the submodules:
//!
//! 1. **Fetching**: download the raw markup of one listing page
//! 2. **Extracting**: turn that markup into [`AnnouncementRecord`]s
//!
//! | Step | Module | Notes |
//! |------|--------|-------|
//! | Fetch | [`fetch`] | `reqwest`, bounded timeout, UTF-8 decoding |
//! | Extract | [`tadnews`] | `scraper` DOM traversal of the striped listing table |
//!
//! Both steps fail per page only: a failed fetch or an unrecognised page is
//! logged and contributes no records.
//!
//! [`AnnouncementRecord`]: crate::models::AnnouncementRecord

pub mod fetch;
pub mod tadnews;
