//! Handlecheck Resolver - handle status resolution and bulk orchestration.
//!
//! This crate answers "is this handle usable?" against a rate-limiting,
//! schema-unstable remote service. It coordinates a structured-data probe,
//! heuristic page classification, retries and bounded-concurrency bulk checks.
//!
//! # Features
//!
//! - Structured probe with heuristic HTML fallback
//! - Ordered, inspectable classification cascade with a default-to-taken verdict
//! - Linear-backoff retry for transport faults
//! - Bulk checks in sequential (paced) or concurrent (gated) mode, always
//!   returning one result per input in input order
//!
//! # Example
//!
//! ```rust,ignore
//! use handlecheck_core::{format_result, ResolverConfig};
//! use handlecheck_resolver::HandleChecker;
//!
//! let checker = HandleChecker::new(&ResolverConfig::default())?;
//!
//! let result = checker.check("@some_handle").await;
//! println!("{}", format_result(&result));
//!
//! let results = checker.resolve_many(&["first_one", "second_one"]).await;
//! checker.shutdown().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod heuristics;
pub mod orchestrator;
pub mod probe;
pub mod resolver;
pub mod retry;
pub mod transport;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use heuristics::{
    classify_page, classify_response, Classification, ClassificationRule, Matcher, Verdict,
    CASCADE, DEFAULT_VERDICT,
};
pub use orchestrator::HandleChecker;
pub use resolver::StatusResolver;
pub use retry::{RetryOutcome, RetryPolicy};
pub use transport::{FetchedPage, HttpTransport, Transport};
