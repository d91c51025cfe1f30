//! Minimum-interval request pacing
//!
//! The remote provider enforces a hard rate ceiling. The pacer spaces request
//! *starts* rather than completions, so the worst-case request rate stays
//! bounded independent of response latency.

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum interval between the starts of any two outbound requests
///
/// A single instance is shared process-wide (the [`ApiClient`](crate::ApiClient)
/// keeps it behind a mutex so pacing remains global if callers are ever
/// concurrent). Time is read through `tokio::time`, so tests drive the pacer
/// deterministically with a paused runtime clock.
pub struct Pacer {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer with the given minimum interval between request starts
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Suspends until at least `min_interval` has elapsed since the start of
    /// the previous request, then records the new request start time
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}
