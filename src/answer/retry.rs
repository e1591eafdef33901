use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::client::{GenerateError, Generator};
use crate::config::LlmConfig;

/// Exponential backoff for rate-limited model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl From<&LlmConfig> for RetryPolicy {
    fn from(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            min_delay: Duration::from_millis(config.min_backoff_ms),
            max_delay: Duration::from_millis(config.max_backoff_ms),
        }
    }
}

impl RetryPolicy {
    /// Delay after the `failures`-th failed attempt: `min_delay * 2^(failures - 1)`,
    /// capped at `max_delay`.
    pub fn delay_after(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.min_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Wraps a [`Generator`], retrying calls that failed with a momentary rate
/// limit. Every other error is returned on first occurrence.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G> RetryingGenerator<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: Generator> Generator for RetryingGenerator<G> {
    async fn generate(
        &self,
        system_prompt: &str,
        context: &str,
        question: &str,
    ) -> Result<String, GenerateError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.inner.generate(system_prompt, context, question).await {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.policy.delay_after(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Model call rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after(2), Duration::from_secs(2));
        assert_eq!(policy.delay_after(3), Duration::from_secs(4));
        assert_eq!(policy.delay_after(5), Duration::from_secs(10));
        assert_eq!(policy.delay_after(40), Duration::from_secs(10));
    }
}
