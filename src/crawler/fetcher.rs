//! HTTP fetcher implementation
//!
//! One rate-limited GET per listing page, with error capture instead of
//! propagation: whatever goes wrong — connect failure, timeout, non-2xx —
//! is reported as a value and ends that category's pagination. There is no
//! retry and no backoff beyond the pipeline's politeness delay.

use crate::config::ScrapeSettings;
use reqwest::Client;
use std::time::Duration;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Consumes the result, yielding the body for a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body } => Some(body),
            _ => None,
        }
    }
}

/// Builds the shared HTTP client
///
/// The client carries the configured User-Agent and per-request timeout;
/// compressed responses are handled transparently.
pub fn build_http_client(settings: &ScrapeSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one listing page
///
/// Failures are logged here and returned as values; the caller must treat
/// anything but `Success` as "stop paginating this category".
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The listing page URL
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                tracing::warn!("Request failed for {}: HTTP {}", url, status.as_u16());
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success { body },
                Err(e) => {
                    tracing::warn!("Failed to read body for {}: {}", url, e);
                    FetchResult::NetworkError {
                        error: e.to_string(),
                    }
                }
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::warn!("Request failed for {}: {}", url, error);
            FetchResult::NetworkError { error }
        }
    }
}
