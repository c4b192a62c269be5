//! Handlecheck Core - shared data model for handle availability checks.
//!
//! This crate provides the status taxonomy, the per-handle result record,
//! handle normalization, the resolver configuration value object and the
//! pure reporting helpers that front-ends use to render results.
//!
//! # Modules
//!
//! - [`error`] - Core error types using thiserror
//! - [`config`] - `ResolverConfig` with defaults and validation
//! - [`types`] - `HandleStatus`, `CheckResult`, `Handle` and [`normalize`]
//! - [`report`] - Status labels, one-line and batch report rendering
//!
//! # Example
//!
//! ```rust
//! use handlecheck_core::{format_result, normalize, CheckResult};
//!
//! let handle = normalize("  @Free_Name_9001 ").expect("valid handle");
//! assert_eq!(handle, "free_name_9001");
//!
//! let result = CheckResult::available(&handle, "Handle is free");
//! assert_eq!(format_result(&result), "@free_name_9001: ✅ Available");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::{BulkMode, Endpoints, HeaderProfile, ResolverConfig, HANDLE_PLACEHOLDER};
pub use error::{CoreError, Result};
pub use report::{format_report, format_result, format_summary, status_label, StatusCounts};
pub use types::{normalize, CheckResult, Handle, HandleStatus, INVALID_FORMAT_MESSAGE};
