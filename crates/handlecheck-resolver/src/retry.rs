//! Bounded retry with linear backoff for transport faults.

use crate::error::TransportError;
use handlecheck_core::ResolverConfig;
use std::future::Future;
use std::time::Duration;

/// Retry schedule: up to `max_attempts` attempts, waiting `base_delay * k`
/// after failed attempt `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

/// Outcome of running an operation under a [`RetryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// An attempt succeeded
    Succeeded {
        /// Value returned by the successful attempt
        value: T,
        /// Attempts made, including the successful one
        attempts: u32,
    },
    /// Every attempt failed
    Exhausted {
        /// Attempts made
        attempts: u32,
        /// Fault from the final attempt
        last_error: TransportError,
    },
}

impl RetryPolicy {
    /// Build a policy. A zero attempt count is raised to one.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Policy from resolver settings.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.max_retries, config.retry_base_delay())
    }

    /// Maximum attempts.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after failed attempt `attempt` (1-based) before the next one.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Run `op` until it succeeds or the attempts are used up.
    ///
    /// `op` receives the 1-based attempt number. No delay follows the final
    /// attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> RetryOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => {
                    return RetryOutcome::Succeeded {
                        value,
                        attempts: attempt,
                    }
                }
                Err(e) if attempt >= self.max_attempts => {
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    }
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        "Attempt {}/{} for {} failed: {}, retrying in {:?}",
                        attempt,
                        self.max_attempts,
                        label,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}
