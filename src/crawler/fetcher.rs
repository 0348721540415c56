//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler and aggregator:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification into [`FetchError`]
//!
//! There are no retries. A failed fetch is reported to the caller, which
//! decides whether it is fatal.

use crate::config::CrawlerConfig;
use crate::crawler::parser::{parse_page, Page};
use crate::url::parse_page_url;
use crate::FetchError;
use reqwest::{header, Client};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use company_brief::config::CrawlerConfig;
/// use company_brief::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches and parses pages
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and parses it into a [`Page`]
    ///
    /// Redirects are followed. The returned page carries the final URL, and
    /// relative links resolve against it.
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | URL doesn't parse | `FetchError::InvalidUrl` |
    /// | Non-2xx status | `FetchError::Status` |
    /// | Body is not `text/html` | `FetchError::ContentType` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection or body read failure | `FetchError::Network` |
    pub async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let base_url = parse_page_url(url)?;

        let response = self
            .client
            .get(base_url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::ContentType {
                url: url.to_string(),
                content_type,
            });
        }

        let final_url = response.url().clone();
        if final_url != base_url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        let page = parse_page(&body, &final_url);
        tracing::debug!(
            "Fetched {} ({} bytes, {} links)",
            page.url,
            body.len(),
            page.links.len()
        );

        Ok(page)
    }
}

/// Maps a transport error onto a [`FetchError`]
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
