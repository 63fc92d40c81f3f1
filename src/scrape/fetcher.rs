//! HTTP fetcher with rate-limit retry
//!
//! All network requests go through [`fetch_page`]:
//! - a small random delay precedes every attempt, to stay under the site's
//!   rate limit in the first place
//! - HTTP 429 triggers a bounded retry with backoff, honoring the
//!   `Retry-After` header when the site sends one
//! - any other non-success status or network failure aborts the request

use crate::config::ScraperConfig;
use crate::SweepError;
use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Retry and throttling policy applied to every page fetch
///
/// The upstream behavior this replaces retried 429s forever; retries here
/// are bounded so a persistently hostile server cannot livelock a run.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts per request, counting the first one
    pub max_attempts: u32,

    /// Backoff after a 429 that carries no usable Retry-After header
    pub backoff: Duration,

    /// Upper bound of the uniform random delay before each attempt
    pub jitter: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            backoff: Duration::from_secs(config.retry_backoff_secs),
            jitter: Duration::from_millis(config.request_jitter_ms),
        }
    }
}

/// Builds the HTTP client shared by all workers
///
/// # Arguments
///
/// * `config` - The scraper configuration (user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying on HTTP 429 up to the policy's attempt limit
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
/// * `retry` - Retry and throttling policy
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(SweepError::RateLimitExceeded)` - Every attempt got a 429
/// * `Err(SweepError::HttpStatus)` - A non-429 HTTP error status
/// * `Err(SweepError::Fetch)` - A network-level failure
pub async fn fetch_page(client: &Client, url: &url::Url, retry: &RetryPolicy) -> crate::Result<String> {
    for attempt in 1..=retry.max_attempts {
        jitter_sleep(retry.jitter).await;

        let response = client.get(url.clone()).send().await.map_err(|e| {
            SweepError::Fetch {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let delay = retry_after_delay(&response, retry.backoff);
            tracing::warn!(
                "429 from {} (attempt {}/{}), backing off for {:?}",
                url,
                attempt,
                retry.max_attempts,
                delay
            );
            tokio::time::sleep(delay).await;
            continue;
        }

        if !status.is_success() {
            return Err(SweepError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        return response.text().await.map_err(|e| SweepError::Fetch {
            url: url.to_string(),
            source: e,
        });
    }

    Err(SweepError::RateLimitExceeded {
        url: url.to_string(),
        attempts: retry.max_attempts,
    })
}

/// Extracts the backoff interval from a 429 response
///
/// Uses the `Retry-After` header when present and parseable as whole
/// seconds, otherwise the configured fallback.
fn retry_after_delay(response: &Response, fallback: Duration) -> Duration {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}

/// Sleeps for a uniform random duration in `0..=bound`
async fn jitter_sleep(bound: Duration) {
    if bound.is_zero() {
        return;
    }

    let millis = {
        let mut rng = rand::thread_rng();
        rng.gen_range(0..=bound.as_millis() as u64)
    };

    tokio::time::sleep(Duration::from_millis(millis)).await;
}
