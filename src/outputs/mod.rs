//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the collected announcements as the website's JSON feed
//!
//! # Output Structure
//!
//! ```text
//! public/
//! └── data/
//!     └── announcements.json
//! ```

pub mod json;
