//! Exponential backoff for transient endpoint failures.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::warn;

/// Total attempts, counting the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Attempt budget and sleep bounds for [`retry_with_backoff`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_interval,
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or the
/// policy's attempt budget is spent.
///
/// The final retryable error is passed through `wrap_exhausted`.
pub async fn retry_with_backoff<T, E, Fut, F, R, W>(
    policy: RetryPolicy,
    mut attempt: F,
    is_retryable: R,
    wrap_exhausted: W,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    W: FnOnce(E) -> E,
    E: fmt::Display,
{
    let mut backoff = policy.backoff();
    let mut attempts = 0;

    loop {
        attempts += 1;

        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !is_retryable(&err) {
            return Err(err);
        }
        if attempts >= policy.max_attempts {
            return Err(wrap_exhausted(err));
        }

        let wait = backoff.next_backoff().unwrap_or(policy.max_interval);
        warn!(
            "Attempt {}/{} failed: {}. Retrying in {:.1}s",
            attempts,
            policy.max_attempts,
            err,
            wait.as_secs_f64()
        );
        tokio::time::sleep(wait).await;
    }
}
