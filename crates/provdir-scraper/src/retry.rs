//! Opt-in re-tries for page fetches that failed for transient reasons.
//!
//! Only transport failures and 5xx responses are re-tried. A 429 is
//! returned like any other status error; no pacing is derived from it.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// How many times to re-issue a failed fetch and how long to wait between
/// attempts. The wait before retry `n` (counting from 0) is
/// `backoff_base_secs * 2^n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    fn is_transient(err: &ScraperError) -> bool {
        match err {
            ScraperError::Http(_) => true,
            ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    fn delay(&self, retry: u32) -> Duration {
        Duration::from_secs(
            self.backoff_base_secs
                .saturating_mul(1u64 << retry.min(62)),
        )
    }

    /// Runs `attempt` until it succeeds, fails with a non-transient error, or
    /// `max_retries` re-tries have been spent. The last error is returned.
    pub(crate) async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, ScraperError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ScraperError>>,
    {
        let mut retry = 0u32;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if retry < self.max_retries && Self::is_transient(&err) => {
                    let delay = self.delay(retry);
                    tracing::warn!(
                        retry = retry + 1,
                        max_retries = self.max_retries,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "transient fetch error; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
