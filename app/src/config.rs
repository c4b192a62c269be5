//! Configuration management for the handlecheck CLI.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use handlecheck_core::{BulkMode, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/handlecheck/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Checker settings handed to the resolver
    pub checker: ResolverConfig,
    /// Bulk-run limits enforced by the shell
    pub bulk: BulkConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file is missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `HANDLECHECK_CONCURRENCY`: Override the concurrency limit
    /// - `HANDLECHECK_TIMEOUT_SECS`: Override the per-request timeout
    /// - `HANDLECHECK_MAX_RETRIES`: Override the attempt count
    /// - `HANDLECHECK_PACING_MS`: Override the sequential pacing delay
    /// - `HANDLECHECK_BULK_MODE`: `sequential` or `concurrent`
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("HANDLECHECK_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.checker.concurrency_limit = limit;
            tracing::debug!("Override concurrency_limit from env: {}", limit);
        }

        if let Some(secs) = lookup("HANDLECHECK_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.checker.request_timeout_secs = secs;
            tracing::debug!("Override request_timeout_secs from env: {}", secs);
        }

        if let Some(retries) = lookup("HANDLECHECK_MAX_RETRIES").and_then(|v| v.parse().ok()) {
            self.checker.max_retries = retries;
            tracing::debug!("Override max_retries from env: {}", retries);
        }

        if let Some(ms) = lookup("HANDLECHECK_PACING_MS").and_then(|v| v.parse().ok()) {
            self.checker.pacing_delay_ms = ms;
            tracing::debug!("Override pacing_delay_ms from env: {}", ms);
        }

        if let Some(val) = lookup("HANDLECHECK_BULK_MODE") {
            match val.parse::<BulkMode>() {
                Ok(mode) => {
                    self.checker.bulk_mode = mode;
                    tracing::debug!("Override bulk_mode from env: {:?}", mode);
                }
                Err(e) => tracing::warn!("Ignoring HANDLECHECK_BULK_MODE: {}", e),
            }
        }
    }

    /// Check that the configuration can drive a checker.
    pub fn validate(&self) -> ConfigResult<()> {
        self.checker.validate()?;
        if self.bulk.max_handles == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bulk.max_handles".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/handlecheck/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "handlecheck", "handlecheck")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Bulk-run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Largest handle list accepted in one run
    pub max_handles: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self { max_handles: 500 }
    }
}
