//! Error types for fetching pages and loading settings.
//!
//! Page-level failures ([`FetchError`]) are recovered by the pipeline: they are
//! logged and the page contributes no records. Settings failures
//! ([`ConfigError`]) end the run before any page is fetched.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve one listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, timeout, redirect loop.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a client or server error status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be read to completion.
    #[error("reading body of {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The page URL the failure belongs to.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Failure to resolve run settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no source pages configured")]
    NoSources,

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}
