//! Single-handle status resolution.
//!
//! One attempt tries the structured probe and, when that is inconclusive,
//! fetches the profile page and classifies it. Transport faults on the page
//! fetch are retried under the [`RetryPolicy`]; exhausting the attempts
//! yields an `Error` result instead of a fault.

use crate::error::Result;
use crate::heuristics::classify_response;
use crate::probe::probe;
use crate::retry::{RetryOutcome, RetryPolicy};
use crate::transport::Transport;
use handlecheck_core::{CheckResult, Endpoints, Handle, ResolverConfig};
use std::sync::Arc;

/// Resolves the status of normalized handles.
pub struct StatusResolver {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    retry: RetryPolicy,
}

impl StatusResolver {
    /// Create a resolver over a shared transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: &ResolverConfig) -> Self {
        Self {
            transport,
            endpoints: config.endpoints.clone(),
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Resolve a handle, retrying transport faults. Never fails.
    pub async fn resolve(&self, handle: &Handle) -> CheckResult {
        tracing::debug!("Checking handle @{}", handle);

        match self
            .retry
            .run(handle.as_str(), |_| self.attempt(handle))
            .await
        {
            RetryOutcome::Succeeded { value, .. } => value,
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                tracing::error!(
                    "All {} attempts for @{} failed: {}",
                    attempts,
                    handle,
                    last_error
                );
                CheckResult::error(
                    handle.as_str(),
                    format!("Check failed after {attempts} attempts: {last_error}"),
                )
            }
        }
    }

    /// One resolution attempt: structured probe, then page heuristics.
    ///
    /// # Errors
    /// Returns the transport fault from the profile page fetch. Probe faults
    /// are swallowed.
    pub async fn attempt(&self, handle: &Handle) -> Result<CheckResult> {
        if let Some(result) = probe(self.transport.as_ref(), &self.endpoints, handle).await {
            return Ok(result);
        }

        tracing::debug!("@{}: structured probe inconclusive, using page heuristics", handle);

        let page = self
            .transport
            .get(&self.endpoints.profile_url_for(handle.as_str()))
            .await?;

        tracing::debug!("@{}: HTTP {}", handle, page.status);

        Ok(classify_response(handle, page.status, &page.body))
    }
}
