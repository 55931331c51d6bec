//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with explicit per-request outcomes
//! - Raw-markup link discovery restricted to the target site
//! - The shared frontier (queue, visited set, capped results)
//! - The worker pool that drains the frontier under a deadline

mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use coordinator::{
    process_url, run_crawl, Coordinator, CrawlJob, CrawlOutput, PageOutcome, SkipReason,
};
pub use fetcher::{
    build_http_client, build_probe_client, fetch_text, fetch_url, header_map, FetchResult,
    FetchedPage,
};
pub use frontier::{Frontier, FrontierStats};
pub use links::extract_links;
