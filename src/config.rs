//! Run settings.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. Command-line flags and their environment variables ([`Cli`])
//! 2. An optional YAML settings file
//! 3. Built-in defaults
//!
//! ```yaml
//! sources:
//!   - https://www.cmjh.tn.edu.tw/modules/tadnews/index.php?ncsn=1&g2p=2
//! output: public/data/announcements.json
//! timeout_secs: 10
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Listing pages scraped when nothing else is configured, in page order.
pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://www.cmjh.tn.edu.tw/modules/tadnews/index.php?ncsn=1&nsn=&tag_sn=&g2p=1",
    "https://www.cmjh.tn.edu.tw/modules/tadnews/index.php?ncsn=1&g2p=2",
    "https://www.cmjh.tn.edu.tw/modules/tadnews/index.php?ncsn=1&g2p=3",
];

pub const DEFAULT_OUTPUT: &str = "public/data/announcements.json";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Contents of a settings file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub sources: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl SettingsFile {
    /// Load and parse a YAML settings file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = serde_yaml::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?file, "Loaded settings file");
        Ok(file)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Listing page URLs, scraped in this order.
    pub sources: Vec<String>,
    /// Destination of the JSON feed.
    pub output: PathBuf,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Resolve settings from the command line, reading the settings file it
    /// names, if any.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => SettingsFile::load(path)?,
            None => SettingsFile::default(),
        };
        let settings = Self::merge(file, cli)?;
        info!(
            sources = settings.sources.len(),
            output = %settings.output.display(),
            timeout_secs = settings.timeout_secs,
            "Resolved settings"
        );
        Ok(settings)
    }

    /// Layer `cli` over `file` over the defaults.
    ///
    /// `--source` flags replace the file's list rather than extending it.
    pub fn merge(file: SettingsFile, cli: &Cli) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sources = if !cli.sources.is_empty() {
            cli.sources.clone()
        } else {
            file.sources.unwrap_or(defaults.sources)
        };
        if sources.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(defaults.timeout_secs);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            sources,
            output: cli.output.clone().or(file.output).unwrap_or(defaults.output),
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tadnews_feed").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::merge(SettingsFile::default(), &cli(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sources.len(), 3);
        assert_eq!(settings.output, PathBuf::from("public/data/announcements.json"));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file: SettingsFile = serde_yaml::from_str(
            "sources:\n  - https://example.org/p1\noutput: site/feed.json\n",
        )
        .unwrap();

        let settings = Settings::merge(file, &cli(&[])).unwrap();
        assert_eq!(settings.sources, vec!["https://example.org/p1"]);
        assert_eq!(settings.output, PathBuf::from("site/feed.json"));
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = SettingsFile {
            sources: Some(vec!["https://example.org/from-file".to_string()]),
            output: Some(PathBuf::from("file.json")),
            timeout_secs: Some(30),
        };

        let settings = Settings::merge(
            file,
            &cli(&["-s", "https://example.org/from-cli", "-o", "cli.json", "--timeout-secs", "3"]),
        )
        .unwrap();
        assert_eq!(settings.sources, vec!["https://example.org/from-cli"]);
        assert_eq!(settings.output, PathBuf::from("cli.json"));
        assert_eq!(settings.timeout_secs, 3);
    }

    #[test]
    fn test_empty_source_list_is_rejected() {
        let file = SettingsFile {
            sources: Some(Vec::new()),
            ..SettingsFile::default()
        };

        let err = Settings::merge(file, &cli(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::NoSources));
    }

    #[test]
    fn test_zero_timeout_in_file_is_rejected() {
        let file: SettingsFile = serde_yaml::from_str("timeout_secs: 0\n").unwrap();

        let err = Settings::merge(file, &cli(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tadnews.yaml");
        std::fs::write(&path, "timeout_secs: 4\n").unwrap();

        let file = SettingsFile::load(&path).unwrap();
        assert_eq!(file.timeout_secs, Some(4));
        assert_eq!(file.sources, None);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tadnews.yaml");
        std::fs::write(&path, "urls: []\n").unwrap();

        let err = SettingsFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SettingsFile::load(Path::new("/nonexistent/tadnews.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
