use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Site Extractor
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub discovery: DiscoveryConfig,
    pub probe: ProbeConfig,
    pub deadlines: DeadlineConfig,
    pub response: ResponseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP surface listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:6000".to_string(),
        }
    }
}

/// Outbound HTTP request configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with page fetches
    pub user_agent: String,

    /// Accept header sent with page fetches
    pub accept: String,

    /// Timeout for a single crawled page fetch (milliseconds)
    pub request_timeout_ms: u64,

    /// Timeout for the single fetch of basic mode (milliseconds)
    pub basic_timeout_ms: u64,

    /// Timeout for the root header fetch of advanced mode (milliseconds)
    pub headers_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            request_timeout_ms: 5_000,
            basic_timeout_ms: 7_000,
            headers_timeout_ms: 5_000,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn basic_timeout(&self) -> Duration {
        Duration::from_millis(self.basic_timeout_ms)
    }

    pub fn headers_timeout(&self) -> Duration {
        Duration::from_millis(self.headers_timeout_ms)
    }
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of page records collected per crawl
    pub max_pages: usize,

    /// Number of concurrent crawl workers (capped by `max_pages`)
    pub workers: usize,

    /// Overall deadline for the worker pool (milliseconds)
    pub deadline_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 30,
            workers: 20,
            deadline_ms: 20_000,
        }
    }
}

impl CrawlerConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

/// Sitemap/robots discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Timeout for each sitemap or robots.txt fetch (milliseconds)
    pub timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { timeout_ms: 3_000 }
    }
}

impl DiscoveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Path probe scanner configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProbeConfig {
    /// Number of concurrent probes
    pub workers: usize,

    /// Timeout for the HEAD existence check (milliseconds)
    pub head_timeout_ms: u64,

    /// Timeout for the GET content fetch (milliseconds)
    pub get_timeout_ms: u64,

    /// Maximum number of characters kept as content preview
    pub preview_chars: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            workers: 15,
            head_timeout_ms: 2_000,
            get_timeout_ms: 3_000,
            preview_chars: 1_000,
        }
    }
}

impl ProbeConfig {
    pub fn head_timeout(&self) -> Duration {
        Duration::from_millis(self.head_timeout_ms)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_millis(self.get_timeout_ms)
    }
}

/// Outer deadlines for the advanced-mode sub-tasks
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeadlineConfig {
    /// Deadline for discovery plus crawl (milliseconds)
    pub crawl_ms: u64,

    /// Deadline for the path probe scan (milliseconds)
    pub probe_ms: u64,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            crawl_ms: 30_000,
            probe_ms: 15_000,
        }
    }
}

impl DeadlineConfig {
    pub fn crawl(&self) -> Duration {
        Duration::from_millis(self.crawl_ms)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_millis(self.probe_ms)
    }
}

/// Response payload caps
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResponseConfig {
    /// Page records included in the advanced response
    pub max_pages: usize,

    /// Entries of the discovered-URL set included in the advanced response
    pub max_urls: usize,

    /// Sitemap URLs included in the advanced response
    pub max_sitemap_urls: usize,

    /// Anchor hrefs included in the basic response
    pub max_endpoints: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            max_urls: 100,
            max_sitemap_urls: 50,
            max_endpoints: 50,
        }
    }
}
