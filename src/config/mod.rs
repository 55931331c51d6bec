//! Configuration module for Site Extractor
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; `Config::default()` is a complete, valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use site_extractor::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("extractor.toml")).unwrap();
//! println!("Crawler will collect at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DeadlineConfig, DiscoveryConfig, HttpConfig, ProbeConfig,
    ResponseConfig, ServerConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
