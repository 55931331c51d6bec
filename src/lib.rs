//! Site Extractor: a bounded website crawler and exposure scanner
//!
//! This crate crawls a target website to a bounded page count, turns every
//! fetched page into a structured record (links, forms, media, metadata,
//! structured data, technology hints) and probes a fixed catalog of
//! well-known paths for exposed files.

pub mod config;
pub mod crawler;
pub mod discovery;
pub mod page;
pub mod probe;
pub mod server;
pub mod service;
pub mod url;

use thiserror::Error;

/// Main error type for Site Extractor operations
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Returns true if the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::Url(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site Extractor operations
pub type Result<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use page::{extract_page, PageRecord};
pub use service::{ExtractRequest, Extractor, Mode};
pub use url::{domain_label, normalize_target, normalize_url};
