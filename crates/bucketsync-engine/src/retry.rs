//! Linear-backoff retry policy
//!
//! Copy attempts back off linearly: the sleep after failed attempt `n`
//! (0-based) is `base + n * step`, with defaults of 1s each, so the waits
//! run 1s, 2s, 3s, ... No sleep follows the final attempt.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

/// Default number of attempts per run
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default base delay before the first re-attempt
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default per-attempt delay increment
const DEFAULT_STEP: Duration = Duration::from_secs(1);

/// Bounded sequential retry with linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per invocation (not re-attempts)
    max_attempts: u32,
    /// Sleep after the first failed attempt
    base_delay: Duration,
    /// Additional sleep per subsequent failed attempt
    step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            step: DEFAULT_STEP,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt bound and default delays.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Overrides both delay parameters (tests use `Duration::ZERO`).
    #[must_use]
    pub fn with_delays(mut self, base_delay: Duration, step: Duration) -> Self {
        self.base_delay = base_delay;
        self.step = step;
        self
    }

    /// Total attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sleep duration after failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay + self.step * attempt
    }

    /// Runs `f` up to `max_attempts` times, sleeping between attempts.
    ///
    /// Returns the value together with the 0-based index of the successful
    /// attempt, or the last error once all attempts failed.
    pub async fn run<F, Fut, T>(&self, operation_name: &str, f: F) -> Result<(T, u32)>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..self.max_attempts {
            match f().await {
                Ok(value) => return Ok((value, attempt)),
                Err(err) => {
                    let final_attempt = attempt + 1 == self.max_attempts;
                    if final_attempt {
                        warn!(
                            operation = operation_name,
                            attempt,
                            error = %err,
                            "Attempt failed, bound reached"
                        );
                    } else {
                        let delay = self.delay_for(attempt);
                        warn!(
                            operation = operation_name,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Attempt failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("Retry bound exhausted for {}", operation_name)))
    }
}
