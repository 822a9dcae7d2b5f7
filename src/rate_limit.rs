use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Minimum-interval gate for outbound requests.
///
/// A single timestamp is shared by every caller; each [`acquire`] sleeps out
/// whatever remains of the interval, then stores the current time. The lock is
/// held only while reading or writing the timestamp, never across the sleep,
/// so concurrent callers can compute overlapping waits and wake at nearly the
/// same instant. This is a delaying gate, not a strict queue; callers are
/// never rejected.
///
/// [`acquire`]: RateLimiter::acquire
#[derive(Debug, Clone)]
pub struct RateLimiter {
    last_request: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Arc::new(Mutex::new(None)),
            min_interval,
        }
    }

    /// Suspends until at least `min_interval` has passed since the previous
    /// request, then records the current time.
    pub async fn acquire(&self) {
        let wait = {
            let last = self.last_request.lock().await;
            last.and_then(|at| self.min_interval.checked_sub(at.elapsed()))
        };

        if let Some(wait) = wait {
            tokio::time::sleep(wait).await;
        }

        *self.last_request.lock().await = Some(Instant::now());
    }
}
