//! Constants for the fetch module (timeouts, retry and rate limiting defaults).

use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default delay between consecutive requests, in seconds.
pub const DEFAULT_RATE_LIMIT_SECS: f64 = 1.0;

/// Default maximum number of attempts (including the first).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff multiplier (1.0 keeps the delay fixed).
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.0;

/// Upper bound on any single retry delay.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Maximum Retry-After header value (1 hour) to prevent excessive delays.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(3600);
