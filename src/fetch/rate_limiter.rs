//! Minimum spacing between consecutive requests.
//!
//! The fetcher talks to a single results site, so one limiter per
//! [`Fetcher`](super::Fetcher) is enough: every call to
//! [`RateLimiter::acquire`] waits until at least `delay` has elapsed since the
//! previous request. The first request proceeds immediately.
//!
//! ```
//! use std::time::Duration;
//! use f1_results_core::fetch::RateLimiter;
//!
//! # async fn example() {
//! let limiter = RateLimiter::new(Duration::from_secs(1));
//! limiter.acquire().await; // immediate
//! limiter.acquire().await; // waits ~1s
//! # }
//! ```

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use super::constants::MAX_RETRY_AFTER;

/// Enforces a fixed delay between consecutive requests.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,

    /// `None` until the first request has been made.
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter enforcing `delay` between requests.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        debug!(delay_ms = delay.as_millis(), "creating rate limiter");
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    /// Creates a limiter that never waits.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns whether rate limiting is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }

    /// Returns the configured delay between requests.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits until the next request may be issued, then records it.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis()))]
    pub async fn acquire(&self) {
        if self.is_disabled() {
            return;
        }

        let mut last_request = self.last_request.lock().await;

        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                let wait = self.delay.saturating_sub(elapsed);
                debug!(wait_ms = wait.as_millis(), "applying rate limit delay");
                tokio::time::sleep(wait).await;
            }
        } else {
            debug!("first request - no delay");
        }

        *last_request = Some(Instant::now());
    }
}

/// Parses a Retry-After header value into a Duration.
///
/// Accepts integer seconds (`120`) or an HTTP-date
/// (`Wed, 21 Oct 2025 07:28:00 GMT`). Values above one hour are capped;
/// dates in the past yield zero; anything else yields `None`.
///
/// ```
/// use std::time::Duration;
/// use f1_results_core::fetch::parse_retry_after;
///
/// assert_eq!(parse_retry_after("120"), Some(Duration::from_secs(120)));
/// assert_eq!(parse_retry_after("invalid"), None);
/// ```
#[must_use]
pub fn parse_retry_after(header_value: &str) -> Option<Duration> {
    let header_value = header_value.trim();

    if let Ok(seconds) = header_value.parse::<i64>() {
        if seconds < 0 {
            debug!(seconds, "negative Retry-After value, ignoring");
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        let duration = Duration::from_secs(seconds as u64);
        return Some(cap_retry_after(duration));
    }

    match httpdate::parse_http_date(header_value) {
        Ok(datetime) => match datetime.duration_since(std::time::SystemTime::now()) {
            Ok(duration) => Some(cap_retry_after(duration)),
            Err(_) => Some(Duration::ZERO),
        },
        Err(_) => {
            debug!(header_value, "unparseable Retry-After value");
            None
        }
    }
}

fn cap_retry_after(duration: Duration) -> Duration {
    if duration > MAX_RETRY_AFTER {
        warn!(
            delay_secs = duration.as_secs(),
            max_secs = MAX_RETRY_AFTER.as_secs(),
            "Retry-After exceeds maximum, capping at 1 hour"
        );
        MAX_RETRY_AFTER
    } else {
        duration
    }
}
