//! Shared types: the status taxonomy, the per-handle result record and the
//! validated `Handle` newtype.

use crate::error::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Message attached to results for inputs that fail the handle format rules.
pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid handle format (2-24 characters: letters, digits, '_' and '.')";

/// Registration status of a handle. Exactly one per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleStatus {
    /// Nobody holds the handle
    Available,
    /// An account holds the handle
    Taken,
    /// The handle exists but is banned or otherwise invalid
    Unavailable,
    /// The status could not be determined
    Error,
}

impl HandleStatus {
    /// All variants in report order.
    pub const ALL: [Self; 4] = [Self::Available, Self::Taken, Self::Unavailable, Self::Error];
}

/// Outcome of checking one handle.
///
/// Immutable once built; the `handle` field keeps the caller's original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    handle: String,
    status: HandleStatus,
    message: Option<String>,
}

impl CheckResult {
    /// Build a result with an optional message.
    #[must_use]
    pub fn new(handle: impl Into<String>, status: HandleStatus, message: Option<String>) -> Self {
        Self {
            handle: handle.into(),
            status,
            message,
        }
    }

    /// Shorthand for an `Available` result.
    #[must_use]
    pub fn available(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(handle, HandleStatus::Available, Some(message.into()))
    }

    /// Shorthand for a `Taken` result.
    #[must_use]
    pub fn taken(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(handle, HandleStatus::Taken, Some(message.into()))
    }

    /// Shorthand for an `Unavailable` result.
    #[must_use]
    pub fn unavailable(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(handle, HandleStatus::Unavailable, Some(message.into()))
    }

    /// Shorthand for an `Error` result.
    #[must_use]
    pub fn error(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(handle, HandleStatus::Error, Some(message.into()))
    }

    /// Returns a copy of this result attributed to a different input string.
    #[must_use]
    pub fn for_input(self, handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            ..self
        }
    }

    /// The handle as given by the caller.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The handle without surrounding whitespace or a leading `@`, for display.
    #[must_use]
    pub fn display_handle(&self) -> &str {
        let trimmed = self.handle.trim();
        trimmed.strip_prefix('@').unwrap_or(trimmed).trim()
    }

    /// The resolved status.
    #[must_use]
    pub fn status(&self) -> HandleStatus {
        self.status
    }

    /// Explanation or evidence for the status, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// A normalized handle: lowercase, no leading `@`, 2-24 characters of
/// ASCII letters, digits, `_` or `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Normalize and validate a raw handle.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidHandle` if the normalized form is empty or
    /// does not match the handle pattern.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let canonical = canonicalize(raw);

        if canonical.is_empty() {
            return Err(CoreError::InvalidHandle {
                handle: raw.to_string(),
                reason: "handle is empty".to_string(),
            });
        }

        if handle_regex().is_match(&canonical) {
            Ok(Self(canonical))
        } else {
            Err(CoreError::InvalidHandle {
                handle: raw.to_string(),
                reason: "must be 2-24 characters of letters, digits, '_' or '.'".to_string(),
            })
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Handle {
    type Error = CoreError;

    fn try_from(raw: String) -> Result<Self, CoreError> {
        Self::parse(&raw)
    }
}

impl From<Handle> for String {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize and validate a raw handle, returning `None` when invalid.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    Handle::parse(raw).ok().map(|h| h.0)
}

fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let unprefixed = trimmed.strip_prefix('@').unwrap_or(trimmed);
    unprefixed.trim().to_lowercase()
}

fn handle_regex() -> &'static Regex {
    static HANDLE_REGEX: OnceLock<Regex> = OnceLock::new();
    HANDLE_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9_.]{2,24}$").expect("valid regex"))
}
