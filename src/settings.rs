//! Layered configuration for defaults the CLI can override.
//!
//! Sources, later wins: built-in defaults, an optional TOML file, then
//! `SITEWATCH_`-prefixed environment variables (e.g. `SITEWATCH_ENDPOINT`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Resolved application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Backend base endpoint.
    pub endpoint: String,
    /// Default check interval in seconds (form pre-fill).
    pub interval: u64,
    /// Default requests per check (form pre-fill).
    pub requests: u32,
    /// Diagnostic log file; stdout belongs to the TUI.
    pub log_file: PathBuf,
}

impl Settings {
    /// Load settings, layering the optional file and environment over defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("endpoint", "http://localhost:8000")?
            .set_default("interval", 30)?
            .set_default("requests", 3)?
            .set_default("log_file", "sitewatch.log")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("SITEWATCH"));

        builder
            .build()
            .context("failed to load configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:8000");
        assert_eq!(settings.interval, 30);
        assert_eq!(settings.requests, 3);
        assert_eq!(settings.log_file, PathBuf::from("sitewatch.log"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "endpoint = \"http://monitor.internal:9000\"\ninterval = 10"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.endpoint, "http://monitor.internal:9000");
        assert_eq!(settings.interval, 10);
        // Untouched keys keep their defaults
        assert_eq!(settings.requests, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/sitewatch.toml"))).is_err());
    }
}
