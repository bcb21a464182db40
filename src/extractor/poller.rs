//! Bounded retry-with-timeout polling.
//!
//! The target page renders content on unpredictable client-side schedules; a
//! fixed deadline bounds worst-case latency so extraction always terminates.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Budget for one bounded poll: fixed deadline, fixed re-check interval.
#[derive(Debug, Clone)]
pub struct WaitSpec {
    pub timeout: Duration,
    pub interval: Duration,
}

impl WaitSpec {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn from_millis(timeout_ms: u64, interval_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
        )
    }
}

/// Poll `finder` until it yields a value or the deadline expires.
///
/// The first probe runs immediately and a hit returns without any delay.
/// Deadline expiry returns `None` rather than an error; timeouts are
/// non-fatal and surface as empty fields in the extraction result.
pub async fn wait_for<T, F, Fut>(spec: &WaitSpec, target: &str, mut finder: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + spec.timeout;
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if let Some(found) = finder().await {
            debug!("{} found after {} probe(s)", target, attempts);
            return Some(found);
        }
        if Instant::now() >= deadline {
            debug!(
                "{} not found within {:?} ({} probes)",
                target, spec.timeout, attempts
            );
            return None;
        }
        sleep(spec.interval).await;
    }
}
