//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use crate::error::{Error, Result};

/// Default tracing filter when none is configured.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// JSON verse library used by the `grade` command
    pub library_path: Option<PathBuf>,
    /// `tracing` filter directive (e.g. "warn", "versecheck=debug")
    pub log_filter: String,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            library_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(path) = env::var("VERSECHECK_LIBRARY") {
            config.library_path = Some(expand_path(&path));
        }

        if let Ok(filter) = env::var("VERSECHECK_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }

    /// The verse library path, or an error explaining how to set one.
    pub fn require_library(&self) -> Result<&PathBuf> {
        self.library_path.as_ref().ok_or_else(|| {
            Error::config(
                "no verse library configured",
                "Pass --library or set VERSECHECK_LIBRARY to a JSON file of verses",
            )
        })
    }
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}
