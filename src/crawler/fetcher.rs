//! HTTP fetcher implementation
//!
//! This module handles all outbound HTTP requests, including:
//! - Building HTTP clients with the configured header set
//! - GET requests for crawled pages, sitemaps and robots.txt
//! - Error classification into an explicit `FetchResult`
//!
//! Nothing here retries: a failed request is reported once and the caller
//! decides to drop the item.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed by the page client
const MAX_REDIRECTS: usize = 10;

/// A completed HTTP exchange, whatever its status code
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Response headers; repeated headers are joined with ", "
    pub headers: BTreeMap<String, String>,

    /// Decoded response body
    pub body: String,
}

impl FetchedPage {
    /// Returns true for `200 OK`, the only status the crawler extracts from
    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered; the status code may still be an error
    Fetched(FetchedPage),

    /// Network error (connection refused, DNS failure, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request ran into its timeout
        timed_out: bool,
    },
}

/// Builds the client used for crawled pages, discovery and content fetches
///
/// Redirects are followed (up to 10 hops) and every request carries the
/// configured User-Agent and Accept headers.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    base_builder(config)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
}

/// Builds the client used for probe existence checks
///
/// Redirects are never followed so that a `301` to a login page is
/// reported as-is instead of as the login page's `200`.
pub fn build_probe_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    base_builder(config).redirect(Policy::none()).build()
}

fn base_builder(config: &HttpConfig) -> reqwest::ClientBuilder {
    let mut headers = HeaderMap::new();
    if let Ok(accept) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, accept);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
}

/// Fetches a URL with a per-request timeout
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Deadline for the whole exchange, body included
///
/// # Returns
///
/// A `FetchResult` carrying either the response or the classified failure
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let final_url = response.url().clone();
    let status_code = response.status().as_u16();
    let headers = header_map(response.headers());

    match response.text().await {
        Ok(body) => FetchResult::Fetched(FetchedPage {
            final_url,
            status_code,
            headers,
            body,
        }),
        Err(e) => classify_error(e),
    }
}

/// Fetches a text resource, returning its body only on `200 OK`
///
/// Used by discovery, where any failure simply contributes nothing.
pub async fn fetch_text(client: &Client, url: &str, timeout: Duration) -> Option<String> {
    match fetch_url(client, url, timeout).await {
        FetchResult::Fetched(page) if page.is_ok() => Some(page.body),
        FetchResult::Fetched(page) => {
            tracing::debug!("{} answered HTTP {}", url, page.status_code);
            None
        }
        FetchResult::NetworkError { error, .. } => {
            tracing::debug!("Failed to fetch {}: {}", url, error);
            None
        }
    }
}

/// Flattens a header map into sorted name/value pairs
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
