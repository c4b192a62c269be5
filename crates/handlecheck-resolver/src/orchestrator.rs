//! Checker orchestrating single and bulk handle checks.
//!
//! This module provides the `HandleChecker`, which normalizes input, admits
//! resolutions through a counting gate, and drives bulk checks in either
//! sequential (paced) or concurrent mode. Every input yields exactly one
//! result, in input order.

use crate::resolver::StatusResolver;
use crate::transport::{HttpTransport, Transport};
use futures::future::join_all;
use futures::FutureExt;
use handlecheck_core::{
    BulkMode, CheckResult, CoreError, Handle, ResolverConfig, INVALID_FORMAT_MESSAGE,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Bulk progress is logged every this many handles.
const PROGRESS_INTERVAL: usize = 10;

const GATE_CLOSED_MESSAGE: &str = "Internal error: admission gate closed";

/// Checks handles against the remote service.
pub struct HandleChecker {
    resolver: StatusResolver,
    transport: Arc<dyn Transport>,
    gate: Semaphore,
    bulk_mode: BulkMode,
    pacing_delay: Duration,
}

impl HandleChecker {
    /// Create a checker backed by an [`HttpTransport`].
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: &ResolverConfig) -> Result<Self, CoreError> {
        let transport = Arc::new(HttpTransport::new(config));
        Self::with_transport(config, transport)
    }

    /// Create a checker over a caller-supplied transport.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfig` if the configuration is invalid.
    pub fn with_transport(
        config: &ResolverConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        Ok(Self {
            resolver: StatusResolver::new(transport.clone(), config),
            transport,
            gate: Semaphore::new(config.concurrency_limit),
            bulk_mode: config.bulk_mode,
            pacing_delay: config.pacing_delay(),
        })
    }

    /// Check one raw handle.
    ///
    /// Invalid input is reported as `Unavailable` without any network call.
    /// The returned result carries `raw` as its handle.
    pub async fn check(&self, raw: &str) -> CheckResult {
        let handle = match Handle::parse(raw) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!("Rejected handle input: {}", e);
                return CheckResult::unavailable(raw, INVALID_FORMAT_MESSAGE);
            }
        };

        // The gate is never closed; a closed gate is an internal fault.
        let Ok(_permit) = self.gate.acquire().await else {
            tracing::error!("Admission gate closed while checking {}", raw);
            return CheckResult::error(raw, GATE_CLOSED_MESSAGE);
        };

        self.resolver.resolve(&handle).await.for_input(raw)
    }

    /// Check many raw handles, returning one result per input in input order.
    pub async fn resolve_many<S: AsRef<str>>(&self, handles: &[S]) -> Vec<CheckResult> {
        if handles.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            "Starting bulk check of {} handles ({:?} mode)",
            handles.len(),
            self.bulk_mode
        );

        let results = match self.bulk_mode {
            BulkMode::Sequential => self.resolve_sequential(handles).await,
            BulkMode::Concurrent => self.resolve_concurrent(handles).await,
        };

        tracing::info!("Bulk check complete: {} results", results.len());
        results
    }

    /// Release the transport's connections. The checker stays usable.
    pub async fn shutdown(&self) {
        self.transport.shutdown().await;
    }

    async fn resolve_sequential<S: AsRef<str>>(&self, handles: &[S]) -> Vec<CheckResult> {
        let total = handles.len();
        let mut results = Vec::with_capacity(total);

        for (i, raw) in handles.iter().enumerate() {
            results.push(self.check_isolated(raw.as_ref()).await);
            log_progress(i + 1, total);

            if i + 1 < total && !self.pacing_delay.is_zero() {
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        results
    }

    async fn resolve_concurrent<S: AsRef<str>>(&self, handles: &[S]) -> Vec<CheckResult> {
        let total = handles.len();
        let completed = AtomicUsize::new(0);

        // join_all yields outputs in input order regardless of completion order
        join_all(handles.iter().map(|raw| {
            let completed = &completed;
            async move {
                let result = self.check_isolated(raw.as_ref()).await;
                log_progress(completed.fetch_add(1, Ordering::Relaxed) + 1, total);
                result
            }
        }))
        .await
    }

    /// Check one handle, converting a panic in the resolution path into an
    /// `Error` result.
    async fn check_isolated(&self, raw: &str) -> CheckResult {
        match AssertUnwindSafe(self.check(raw)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::error!("Unexpected failure while checking {}: {}", raw, reason);
                CheckResult::error(raw, format!("Unexpected failure: {reason}"))
            }
        }
    }
}

fn log_progress(done: usize, total: usize) {
    if done % PROGRESS_INTERVAL == 0 {
        tracing::info!("Checked {}/{} handles", done, total);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(payload.as_ref()), "owned boom");

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[tokio::test]
    async fn test_closed_gate_reports_internal_error() {
        let checker = HandleChecker::new(&ResolverConfig::default()).expect("valid config");
        checker.gate.close();

        let result = checker.check("@valid_one").await;

        assert_eq!(result.status(), handlecheck_core::HandleStatus::Error);
        assert_eq!(result.message(), Some(GATE_CLOSED_MESSAGE));
        assert_eq!(result.handle(), "@valid_one");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ResolverConfig {
            concurrency_limit: 0,
            ..ResolverConfig::default()
        };
        assert!(HandleChecker::new(&config).is_err());
    }
}
