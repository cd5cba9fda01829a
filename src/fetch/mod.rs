//! Fetching the results page over HTTP.
//!
//! # Features
//!
//! - One reqwest client per [`Fetcher`], built from an explicit [`FetchConfig`]
//! - Retry on transient failures (timeouts, connection errors, 408, 429, 5xx)
//! - Fixed delay between attempts, optionally growing by a backoff multiplier
//! - `Retry-After` honored on 429 responses
//! - Browser-like default headers
//!
//! # Example
//!
//! ```no_run
//! use f1_results_core::fetch::{FetchConfig, Fetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(&FetchConfig::default())?;
//! let page = fetcher
//!     .fetch("https://www.formula1.com/en/results/2024/races")
//!     .await?;
//! println!("{} bytes after {} attempt(s)", page.markup.len(), page.attempts);
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod rate_limiter;
mod retry;

pub use client::{FetchConfig, FetchedPage, Fetcher};
pub use constants::{
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT_SECS,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::FetchError;
pub use rate_limiter::{RateLimiter, parse_retry_after};
pub use retry::{FailureType, RetryDecision, RetryPolicy, classify_error};
