//! HTTP fetcher for the results page.
//!
//! A [`Fetcher`] owns its reqwest client, retry policy and rate limiter, all
//! built from one [`FetchConfig`]. Dropping the fetcher releases the
//! connection pool.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT_SECS,
    DEFAULT_TIMEOUT_SECS,
};
use super::error::FetchError;
use super::rate_limiter::{RateLimiter, parse_retry_after};
use super::retry::{FailureType, RetryDecision, RetryPolicy, classify_error};
use crate::user_agent::BROWSER_USER_AGENT;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.9";

/// Settings for a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout (connect + read).
    pub timeout: Duration,
    /// Maximum number of attempts, including the first. Clamped to at least 1.
    pub max_retries: u32,
    /// Minimum delay between consecutive requests, and the base retry delay.
    pub rate_limit: Duration,
    /// Growth factor for the retry delay; 1.0 keeps it fixed.
    pub backoff_multiplier: f64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            rate_limit: Duration::from_secs_f64(DEFAULT_RATE_LIMIT_SECS),
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested.
    pub url: String,
    /// Raw response body.
    pub markup: String,
    /// Number of attempts made, including the successful one.
    pub attempts: u32,
}

/// Fetches pages with retry and rate limiting.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
    rate_limiter: RateLimiter,
}

impl Fetcher {
    /// Builds a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be
    /// constructed (for example, an invalid User-Agent header value).
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;

        let rate_limiter = if config.rate_limit.is_zero() {
            debug!("rate limiting disabled");
            RateLimiter::disabled()
        } else {
            RateLimiter::new(config.rate_limit)
        };

        debug!(
            timeout_secs = config.timeout.as_secs_f64(),
            max_retries = config.max_retries,
            rate_limit_ms = config.rate_limit.as_millis(),
            "fetcher configured"
        );

        Ok(Self {
            client,
            policy: RetryPolicy::new(
                config.max_retries,
                config.rate_limit,
                config.backoff_multiplier,
            ),
            rate_limiter,
        })
    }

    /// Returns the retry policy in effect.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the last [`FetchError`] once the failure is permanent or the
    /// attempt budget is spent. A non-2xx final response is
    /// [`FetchError::HttpStatus`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        validate_url(url)?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            info!(
                attempt,
                max_attempts = self.policy.max_attempts(),
                "fetching"
            );

            self.rate_limiter.acquire().await;

            match self.fetch_once(url).await {
                Ok(markup) => {
                    info!(bytes = markup.len(), attempt, "fetched page");
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        markup,
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    let failure_type = classify_error(&e);
                    let retry_after = if failure_type == FailureType::RateLimited {
                        retry_after_delay(&e)
                    } else {
                        None
                    };

                    match self.policy.should_retry(failure_type, attempt) {
                        RetryDecision::Retry {
                            delay: backoff_delay,
                            attempt: next_attempt,
                        } => {
                            let delay = retry_after.unwrap_or(backoff_delay);
                            warn!(
                                attempt = next_attempt,
                                max_attempts = self.policy.max_attempts(),
                                delay_ms = delay.as_millis(),
                                using_retry_after = retry_after.is_some(),
                                error = %e,
                                "fetch failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        RetryDecision::DoNotRetry { reason } => {
                            warn!(attempt, %reason, error = %e, "giving up on fetch");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(std::string::ToString::to_string);
            return Err(FetchError::http_status_with_retry_after(
                url,
                status.as_u16(),
                retry_after,
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !content_type.contains("text/html") {
            warn!(%content_type, "unexpected content type");
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::body(url, e)
            }
        })
    }
}

fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::invalid_url(url));
    }
    Ok(())
}

fn retry_after_delay(error: &FetchError) -> Option<Duration> {
    let FetchError::HttpStatus {
        retry_after: Some(header),
        ..
    } = error
    else {
        return None;
    };
    let delay = parse_retry_after(header)?;
    debug!(retry_after = %header, delay_ms = delay.as_millis(), "using Retry-After header delay");
    Some(delay)
}
