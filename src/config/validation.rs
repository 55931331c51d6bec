use crate::config::types::{Config, CrawlerConfig, HttpConfig, ProbeConfig, ResponseConfig};
use crate::ConfigError;
use std::net::SocketAddr;

const MAX_WORKERS: usize = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_bind(&config.server.bind)?;
    validate_http_config(&config.http)?;
    validate_crawler_config(&config.crawler)?;
    validate_timeout("discovery.timeout-ms", config.discovery.timeout_ms)?;
    validate_probe_config(&config.probe)?;
    validate_timeout("deadlines.crawl-ms", config.deadlines.crawl_ms)?;
    validate_timeout("deadlines.probe-ms", config.deadlines.probe_ms)?;
    validate_crawl_deadline(config)?;
    validate_response_config(&config.response)?;
    Ok(())
}

fn validate_bind(bind: &str) -> Result<(), ConfigError> {
    bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("server.bind '{}' is not a socket address: {}", bind, e))
    })?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "http.user-agent cannot be empty".to_string(),
        ));
    }

    validate_timeout("http.request-timeout-ms", config.request_timeout_ms)?;
    validate_timeout("http.basic-timeout-ms", config.basic_timeout_ms)?;
    validate_timeout("http.headers-timeout-ms", config.headers_timeout_ms)?;
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_workers("crawler.workers", config.workers)?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "crawler.max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    validate_timeout("crawler.deadline-ms", config.deadline_ms)
}

fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    validate_workers("probe.workers", config.workers)?;
    validate_timeout("probe.head-timeout-ms", config.head_timeout_ms)?;
    validate_timeout("probe.get-timeout-ms", config.get_timeout_ms)?;

    if config.preview_chars < 1 {
        return Err(ConfigError::Validation(
            "probe.preview-chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_response_config(config: &ResponseConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("response.max-pages", config.max_pages),
        ("response.max-urls", config.max_urls),
        ("response.max-sitemap-urls", config.max_sitemap_urls),
        ("response.max-endpoints", config.max_endpoints),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!("{} must be >= 1", name)));
        }
    }
    Ok(())
}

fn validate_workers(name: &str, workers: usize) -> Result<(), ConfigError> {
    if workers < 1 || workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_WORKERS, workers
        )));
    }
    Ok(())
}

/// The outer crawl deadline must outlast discovery plus the worker pool's
/// own deadline, otherwise partial crawl results are always discarded
fn validate_crawl_deadline(config: &Config) -> Result<(), ConfigError> {
    let inner = config
        .crawler
        .deadline_ms
        .saturating_add(config.discovery.timeout_ms);

    if config.deadlines.crawl_ms <= inner {
        return Err(ConfigError::Validation(format!(
            "deadlines.crawl-ms ({}ms) must exceed crawler.deadline-ms + discovery.timeout-ms ({}ms)",
            config.deadlines.crawl_ms, inner
        )));
    }
    Ok(())
}

fn validate_timeout(name: &str, millis: u64) -> Result<(), ConfigError> {
    if millis < 1 {
        return Err(ConfigError::Validation(format!(
            "{} must be >= 1ms, got {}ms",
            name, millis
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_workers() {
        assert!(validate_workers("w", 1).is_ok());
        assert!(validate_workers("w", 100).is_ok());

        assert!(validate_workers("w", 0).is_err());
        assert!(validate_workers("w", 101).is_err());
    }

    #[test]
    fn test_validate_bind() {
        assert!(validate_bind("0.0.0.0:6000").is_ok());
        assert!(validate_bind("[::1]:8080").is_ok());

        assert!(validate_bind("").is_err());
        assert!(validate_bind("localhost").is_err());
        assert!(validate_bind("0.0.0.0:99999").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.probe.head_timeout_ms = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("probe.head-timeout-ms"));
    }

    #[test]
    fn test_zero_page_cap_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_crawl_deadline_must_outlast_worker_pool() {
        let mut config = Config::default();
        config.crawler.deadline_ms = 3_000;
        config.discovery.timeout_ms = 1_000;

        config.deadlines.crawl_ms = 1_500;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("deadlines.crawl-ms"));

        config.deadlines.crawl_ms = 4_000;
        assert!(validate(&config).is_err());

        config.deadlines.crawl_ms = 4_001;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let mut config = Config::default();
        config.http.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }
}
