//! Fixed-delay retry policy with a per-failure classifier

use std::future::Future;
use std::time::Duration;

/// What to do with the result of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision<T, E> {
    /// Transient failure, try again if attempts remain
    Retry(E),
    /// Final result, stop
    Done(T),
    /// Final failure, stop without retrying
    Fail(E),
}

/// Retry policy: bounded attempts with a fixed delay between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until `classify` says stop or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. When attempts are exhausted the
    /// last `Retry` failure is returned.
    pub async fn run<R, T, E, Op, Fut, C>(&self, mut op: Op, classify: C) -> Result<T, E>
    where
        Op: FnMut(u32) -> Fut,
        Fut: Future<Output = R>,
        C: Fn(R) -> RetryDecision<T, E>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match classify(op(attempt).await) {
                RetryDecision::Done(value) => return Ok(value),
                RetryDecision::Fail(err) => return Err(err),
                RetryDecision::Retry(err) if attempt >= max_attempts => {
                    tracing::debug!(attempt, error = %err, "Giving up after final attempt");
                    return Err(err);
                }
                RetryDecision::Retry(err) => {
                    tracing::debug!(
                        attempt,
                        max_attempts,
                        delay_ms = %self.delay.as_millis(),
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
