//! Bounded fixed-delay retry
//!
//! The provider's failures are mostly transient (momentary 5xx, dropped
//! connections), so every outbound call is wrapped in a small, explicit retry
//! policy. The delay is fixed, not an exponential backoff curve.

use crate::Result;
use std::future::Future;
use std::time::Duration;

/// Retries an async operation a bounded number of times with a fixed delay
///
/// Two profiles are configured: heavy data calls retry slowly (the provider
/// throttles aggressively on repeated failures), the lightweight
/// alias-resolution call retries quickly.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with `max_attempts` total attempts and a fixed `delay`
    /// between them
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Invokes `op`, retrying on any failure until the attempt budget is
    /// spent; the last failure propagates to the caller
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "request failed, retrying in {:?}",
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArchiveError;
    use std::cell::Cell;

    fn transient_error() -> ArchiveError {
        ArchiveError::Status {
            endpoint: "method/test".to_string(),
            status: 500,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_secs(60));
        let calls = Cell::new(0u32);

        let result = policy
            .run(|| {
                calls.set(calls.get() + 1);
                async { Ok(42) }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let policy = RetryPolicy::new(3, Duration::from_secs(60));
        let calls = Cell::new(0u32);

        let result = policy
            .run(|| {
                calls.set(calls.get() + 1);
                let succeed = calls.get() == 3;
                async move {
                    if succeed {
                        Ok("done")
                    } else {
                        Err(transient_error())
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_propagates_last_failure() {
        let policy = RetryPolicy::new(3, Duration::from_secs(60));
        let calls = Cell::new(0u32);

        let result: Result<()> = policy
            .run(|| {
                calls.set(calls.get() + 1);
                async { Err(transient_error()) }
            })
            .await;

        assert_eq!(calls.get(), 3);
        assert!(matches!(
            result.unwrap_err(),
            ArchiveError::Status { status: 500, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_never_sleeps() {
        let policy = RetryPolicy::new(1, Duration::from_secs(60));
        let start = tokio::time::Instant::now();

        let result: Result<()> = policy.run(|| async { Err(transient_error()) }).await;

        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
