//! Resolver configuration value object.
//!
//! Loading from disk or the environment is the application's concern; this
//! module only defines the values, their defaults and validation.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder substituted with the normalized handle in endpoint templates.
pub const HANDLE_PLACEHOLDER: &str = "{handle}";

/// Settings supplied once when the checker is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum simultaneous in-flight resolutions
    pub concurrency_limit: usize,
    /// Total timeout per HTTP request in seconds
    pub request_timeout_secs: u64,
    /// Attempts made before a transport fault becomes an `Error` result
    pub max_retries: u32,
    /// Base retry delay in milliseconds (delay before attempt k+1 is base * k)
    pub retry_base_delay_ms: u64,
    /// Delay between consecutive handles in sequential bulk mode, in milliseconds
    pub pacing_delay_ms: u64,
    /// How bulk checks are scheduled
    pub bulk_mode: BulkMode,
    /// Remote endpoints
    pub endpoints: Endpoints,
    /// Browser-like request headers
    pub headers: HeaderProfile,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 10,
            request_timeout_secs: 15,
            max_retries: 3,
            retry_base_delay_ms: 2000,
            pacing_delay_ms: 500,
            bulk_mode: BulkMode::Sequential,
            endpoints: Endpoints::default(),
            headers: HeaderProfile::default(),
        }
    }
}

impl ResolverConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base retry delay as a `Duration`.
    #[must_use]
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Bulk pacing delay as a `Duration`.
    #[must_use]
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Check that the values can drive a checker.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfig` for a zero concurrency limit, zero
    /// attempts, or an endpoint template without the handle placeholder.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency_limit == 0 {
            return Err(invalid("concurrency_limit", "must be at least 1"));
        }
        if self.max_retries == 0 {
            return Err(invalid("max_retries", "must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        for (field, template) in [
            ("endpoints.profile_url", &self.endpoints.profile_url),
            ("endpoints.detail_api_url", &self.endpoints.detail_api_url),
        ] {
            if !template.contains(HANDLE_PLACEHOLDER) {
                return Err(invalid(field, "must contain {handle}"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> CoreError {
    CoreError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Scheduling strategy for bulk checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkMode {
    /// One handle at a time with the pacing delay between handles
    #[default]
    Sequential,
    /// All handles submitted at once, bounded by the concurrency limit
    Concurrent,
}

impl std::str::FromStr for BulkMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(invalid(
                "bulk_mode",
                &format!("expected 'sequential' or 'concurrent', got '{other}'"),
            )),
        }
    }
}

/// URL templates for the two remote endpoints. `{handle}` is replaced with
/// the normalized handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Public profile page
    pub profile_url: String,
    /// Structured user-detail query
    pub detail_api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            profile_url: "https://www.tiktok.com/@{handle}".to_string(),
            detail_api_url: "https://www.tiktok.com/api/user/detail/?uniqueId={handle}&secUid="
                .to_string(),
        }
    }
}

impl Endpoints {
    /// Profile page URL for a normalized handle.
    #[must_use]
    pub fn profile_url_for(&self, handle: &str) -> String {
        self.profile_url.replace(HANDLE_PLACEHOLDER, handle)
    }

    /// Structured query URL for a normalized handle.
    #[must_use]
    pub fn detail_api_url_for(&self, handle: &str) -> String {
        self.detail_api_url.replace(HANDLE_PLACEHOLDER, handle)
    }
}

/// Header values that make requests look like an ordinary browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderProfile {
    /// `User-Agent`
    pub user_agent: String,
    /// `Accept`
    pub accept: String,
    /// `Accept-Language`
    pub accept_language: String,
}

impl Default for HeaderProfile {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.concurrency_limit, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay(), Duration::from_secs(2));
        assert_eq!(config.pacing_delay(), Duration::from_millis(500));
        assert_eq!(config.bulk_mode, BulkMode::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
concurrency_limit = 4
bulk_mode = "concurrent"

[endpoints]
profile_url = "http://localhost:8080/@{handle}"
"#;

        let config: ResolverConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.concurrency_limit, 4);
        assert_eq!(config.bulk_mode, BulkMode::Concurrent);
        assert_eq!(config.endpoints.profile_url_for("abc"), "http://localhost:8080/@abc");
        // These should be defaults
        assert_eq!(config.max_retries, 3);
        assert!(config.endpoints.detail_api_url.contains("uniqueId={handle}"));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = ResolverConfig {
            concurrency_limit: 0,
            ..ResolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig { ref field, .. }) if field == "concurrency_limit"
        ));

        let config = ResolverConfig {
            max_retries: 0,
            ..ResolverConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_placeholder() {
        let mut config = ResolverConfig::default();
        config.endpoints.profile_url = "https://example.com/profile".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_substitution() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.profile_url_for("free_name_9001"),
            "https://www.tiktok.com/@free_name_9001"
        );
        assert_eq!(
            endpoints.detail_api_url_for("abc"),
            "https://www.tiktok.com/api/user/detail/?uniqueId=abc&secUid="
        );
    }

    #[test]
    fn test_bulk_mode_from_str() {
        assert_eq!("Concurrent".parse::<BulkMode>(), Ok(BulkMode::Concurrent));
        assert_eq!(" sequential ".parse::<BulkMode>(), Ok(BulkMode::Sequential));
        assert!("parallel".parse::<BulkMode>().is_err());
    }
}
