//! Sitemap and robots.txt discovery
//!
//! This module seeds a crawl with the URLs a site advertises about itself:
//! - every `<loc>` of `/sitemap.xml`, plus one level of sitemap-index nesting
//! - every `<loc>` of the sitemaps named by `Sitemap:` lines in `/robots.txt`
//!
//! Discovery never fails its caller. A missing, unreachable or malformed
//! document simply contributes no URLs.

mod robots;
mod sitemap;

pub use robots::parse_sitemap_directives;
pub use sitemap::{parse_locs, parse_sitemap_index};

use crate::crawler::fetch_text;
use crate::url::{normalize_url, origin_of};
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Upper bound on nested or robots-referenced sitemaps fetched per crawl
const MAX_SITEMAP_FETCHES: usize = 50;

/// Ordered, deduplicated accumulator of discovered URLs
#[derive(Debug, Default)]
struct Discovered {
    seen: HashSet<String>,
    urls: Vec<Url>,
}

impl Discovered {
    fn add(&mut self, url: Url) {
        if self.seen.insert(url.as_str().to_string()) {
            self.urls.push(url);
        }
    }
}

/// Discovers candidate URLs from the root's sitemap and robots.txt
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `root` - Any URL of the target site; its origin is used
/// * `timeout` - Timeout for each individual fetch
///
/// # Returns
///
/// Deduplicated page URLs in discovery order. Locations that are
/// themselves sitemaps (entries of a sitemap index) are followed, not
/// returned.
pub async fn discover_urls(client: &Client, root: &Url, timeout: Duration) -> Vec<Url> {
    let origin = origin_of(root);
    let (Ok(sitemap_url), Ok(robots_url)) = (origin.join("sitemap.xml"), origin.join("robots.txt"))
    else {
        return Vec::new();
    };

    let (sitemap_body, robots_body) = tokio::join!(
        fetch_text(client, sitemap_url.as_str(), timeout),
        fetch_text(client, robots_url.as_str(), timeout),
    );

    let mut discovered = Discovered::default();
    let mut fetched: HashSet<String> = HashSet::new();
    fetched.insert(sitemap_url.as_str().to_string());

    // sitemap.xml and one level of index nesting
    if let Some(body) = sitemap_body {
        let nested = resolve_new(&sitemap_url, parse_sitemap_index(&body), &mut fetched);
        collect_page_locs(&sitemap_url, &body, &mut discovered);

        for (nested_url, nested_body) in fetch_all(client, nested, timeout).await {
            collect_page_locs(&nested_url, &nested_body, &mut discovered);
        }
    }

    // Sitemaps referenced from robots.txt, one level only
    if let Some(body) = robots_body {
        let referenced = resolve_new(&origin, parse_sitemap_directives(&body), &mut fetched);
        for (sitemap, sitemap_body) in fetch_all(client, referenced, timeout).await {
            collect_page_locs(&sitemap, &sitemap_body, &mut discovered);
        }
    }

    tracing::debug!(
        "Discovered {} URLs from sitemaps of {}",
        discovered.urls.len(),
        origin
    );
    discovered.urls
}

/// Adds every `<loc>` of a sitemap document that is not a nested sitemap
fn collect_page_locs(sitemap: &Url, body: &str, discovered: &mut Discovered) {
    let nested: HashSet<String> = parse_sitemap_index(body).into_iter().collect();
    for loc in parse_locs(body) {
        if nested.contains(&loc) {
            continue;
        }
        if let Some(url) = normalize_url(sitemap, &loc) {
            discovered.add(url);
        }
    }
}

/// Resolves sitemap references, dropping ones already fetched
fn resolve_new(base: &Url, references: Vec<String>, fetched: &mut HashSet<String>) -> Vec<Url> {
    references
        .iter()
        .filter_map(|reference| normalize_url(base, reference))
        .filter(|url| fetched.insert(url.as_str().to_string()))
        .take(MAX_SITEMAP_FETCHES)
        .collect()
}

/// Fetches sitemaps concurrently, keeping only the ones that answered `200 OK`
async fn fetch_all(client: &Client, urls: Vec<Url>, timeout: Duration) -> Vec<(Url, String)> {
    let fetches = urls.into_iter().map(|url| async move {
        let body = fetch_text(client, url.as_str(), timeout).await;
        body.map(|body| (url, body))
    });

    join_all(fetches).await.into_iter().flatten().collect()
}
