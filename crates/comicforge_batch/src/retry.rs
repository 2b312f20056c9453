//! Fixed-schedule retry around the generation client.

use comicforge_core::ImageRef;
use comicforge_error::{GenerationError, RetryClass};
use comicforge_interface::{ImageGenerator, ImageRequest};
use std::time::Duration;
use tracing::warn;

/// Attempt-scaled retry schedule for single generation calls.
///
/// Attempts are numbered 1..=`max_attempts`. Every failure is retried until
/// the budget is exhausted; the delay before the next attempt is
/// `base_delay × attempt`, doubled when the failure was an overloaded
/// service. No sleep happens after the final attempt, and the last observed
/// error is returned unchanged, with no wrapping and no aggregation of earlier
/// failures.
///
/// Deliberately non-adaptive: no jitter, no circuit breaker, no cross-task
/// retry budget. The remote API documents no concurrency guarantee, so one
/// in-flight call with a deterministic schedule keeps error attribution
/// simple.
///
/// # Examples
///
/// ```no_run
/// use comicforge_batch::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.base_delay, Duration::from_millis(1000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Base delay unit scaled by the attempt number
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with explicit limits.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Run one generation request through the retry schedule.
    pub async fn run<G>(
        &self,
        generator: &G,
        request: &ImageRequest,
    ) -> Result<ImageRef, GenerationError>
    where
        G: ImageGenerator + ?Sized,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1_u32;

        loop {
            match generator.generate(request).await {
                Ok(image) => return Ok(image),
                Err(err) if attempt < max_attempts => {
                    let factor = if err.is_overloaded() { 2 } else { 1 };
                    let delay = self.base_delay * attempt * factor;
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Generation attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, max_attempts, error = %err, "Generation attempts exhausted");
                    return Err(err);
                }
            }
        }
    }
}
