//! Retry policy and the attempt state machine that drives it.
//!
//! A call is a sequence of attempts indexed from zero. After a failed
//! attempt the policy decides a single [`NextStep`]: back off and try again,
//! or give up and surface the error unchanged. Deciding is pure; the driver
//! owns the loop and the sleeps.

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result};

/// Per-call retry parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub(crate) max_retries: u32,
    /// Backoff before the first retry.
    pub(crate) base_delay: Duration,
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NextStep {
    /// Sleep for `delay`, then run the next attempt.
    Backoff { delay: Duration },
    /// Stop and surface the error unchanged.
    GiveUp,
}

impl RetryPolicy {
    /// Backoff before the retry that follows attempt `attempt`.
    ///
    /// Doubles each time: `base_delay * 2^attempt`, saturating instead of
    /// overflowing for large indexes.
    pub(crate) fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Decides the step after attempt `attempt` failed with `error`.
    pub(crate) fn next_step(&self, attempt: u32, error: &Error) -> NextStep {
        if !error.is_retryable() || attempt >= self.max_retries {
            return NextStep::GiveUp;
        }
        NextStep::Backoff {
            delay: self.delay_for(attempt),
        }
    }
}

/// Runs `attempt` under `policy` until it succeeds or the policy gives up.
///
/// The closure receives the zero-based attempt index. On give-up the last
/// attempt's error is returned as-is, not wrapped. Total invocations never
/// exceed `max_retries + 1`.
pub(crate) async fn run<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut index = 0;
    loop {
        match attempt(index).await {
            Ok(value) => return Ok(value),
            Err(error) => match policy.next_step(index, &error) {
                NextStep::GiveUp => return Err(error),
                NextStep::Backoff { delay } => {
                    tracing::warn!(
                        error = %error,
                        attempt = index + 1,
                        delay_ms = delay.as_millis(),
                        "Request failed, retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                    index += 1;
                }
            },
        }
    }
}
