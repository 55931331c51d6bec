//! Raw-markup link discovery
//!
//! Crawl candidates are found by scanning attribute patterns over the raw
//! page text rather than walking a DOM. This is fast, survives badly broken
//! markup, and also picks up URL-like attributes inside inline scripts and
//! comments. Those occasional false positives are accepted: a bogus
//! candidate costs one failed fetch.

use crate::url::{host_contains_label, normalize_url};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// `href`, `src`, `action` and any `data-*` attribute with a quoted value
static URL_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(href|src|action|data-[a-z][a-z0-9-]*)\s*=\s*["']([^"']+)["']"#)
        .expect("URL attribute pattern is valid")
});

/// Extracts same-site crawl candidates from raw page markup
///
/// # Rules
///
/// - `href`, `src` and `action` values are always considered
/// - `data-*` values are considered only when they look like a URL
///   (start with `http://`, `https://` or `/`)
/// - every value is resolved against `base` with `normalize_url`
/// - only URLs whose host contains `domain_label` are kept
///
/// # Returns
///
/// Deduplicated absolute URLs in first-seen order
pub fn extract_links(html: &str, base: &Url, domain_label: &str) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for captures in URL_ATTRIBUTE.captures_iter(html) {
        let attribute = &captures[1];
        let value = captures[2].trim();

        if is_data_attribute(attribute) && !looks_like_url(value) {
            continue;
        }

        let Some(url) = normalize_url(base, value) else {
            continue;
        };

        if !host_contains_label(&url, domain_label) {
            continue;
        }

        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    links
}

fn is_data_attribute(attribute: &str) -> bool {
    attribute
        .get(..5)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("data-"))
}

fn looks_like_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with('/')
}
