//! Technology hints
//!
//! A fixed catalog of case-insensitive markup signatures, plus the
//! `Server` and `X-Powered-By` response headers and the generator meta tag.
//! Order is deterministic: catalog order, header hints, then generator.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// A markup substring that indicates a technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechSignature {
    /// Lower-case substring searched in the lower-cased markup
    pub marker: &'static str,
    pub name: &'static str,
}

impl TechSignature {
    pub const fn new(marker: &'static str, name: &'static str) -> Self {
        Self { marker, name }
    }
}

pub const DEFAULT_TECH_SIGNATURES: &[TechSignature] = &[
    TechSignature::new("wp-content", "WordPress"),
    TechSignature::new("react", "React"),
    TechSignature::new("vue", "Vue.js"),
    TechSignature::new("angular", "Angular"),
    TechSignature::new("jquery", "jQuery"),
    TechSignature::new("/sites/default/files", "Drupal"),
    TechSignature::new("/media/jui/", "Joomla"),
    TechSignature::new("cdn.shopify.com", "Shopify"),
    TechSignature::new("static.wixstatic.com", "Wix"),
    TechSignature::new("static1.squarespace.com", "Squarespace"),
    TechSignature::new("__next_data__", "Next.js"),
    TechSignature::new("__nuxt", "Nuxt.js"),
    TechSignature::new("bootstrap", "Bootstrap"),
    TechSignature::new("googletagmanager.com", "Google Tag Manager"),
];

static GENERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']generator["'][^>]*content=["']([^"']+)["']"#)
        .expect("generator pattern is valid")
});

/// Detects technologies with the default signature catalog
pub fn detect_technologies(html: &str, headers: &BTreeMap<String, String>) -> Vec<String> {
    detect_technologies_with(html, headers, DEFAULT_TECH_SIGNATURES)
}

/// Detects technologies with a caller-supplied signature catalog
///
/// # Examples
///
/// ```
/// use site_extractor::page::{detect_technologies_with, TechSignature};
/// use std::collections::BTreeMap;
///
/// let catalog = [TechSignature::new("htmx", "htmx")];
/// let hints = detect_technologies_with(
///     r#"<script src="/htmx.min.js"></script>"#,
///     &BTreeMap::new(),
///     &catalog,
/// );
/// assert_eq!(hints, vec!["htmx"]);
/// ```
pub fn detect_technologies_with(
    html: &str,
    headers: &BTreeMap<String, String>,
    signatures: &[TechSignature],
) -> Vec<String> {
    let markup = html.to_lowercase();
    let mut hints: Vec<String> = Vec::new();

    let mut push = |hint: String| {
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    };

    for signature in signatures {
        if markup.contains(signature.marker) {
            push(signature.name.to_string());
        }
    }

    if let Some(server) = header(headers, "server") {
        push(format!("Server: {}", server));
    }
    if let Some(powered_by) = header(headers, "x-powered-by") {
        push(format!("Powered-By: {}", powered_by));
    }

    if let Some(captures) = GENERATOR.captures(html) {
        push(format!("Generator: {}", &captures[1]));
    }

    hints
}

/// Case-insensitive header lookup, ignoring empty values
fn header<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_markup_signatures_in_catalog_order() {
        let html = r#"<script src="/js/jQuery.min.js"></script>
                      <link href="/wp-content/themes/x.css">
                      <div id="REACT-root"></div>"#;
        let hints = detect_technologies(html, &BTreeMap::new());
        assert_eq!(hints, vec!["WordPress", "React", "jQuery"]);
    }

    #[test]
    fn test_header_and_generator_hints() {
        let html = r#"<meta name="generator" content="Hugo 0.120.0">"#;
        let hints = detect_technologies(
            html,
            &headers(&[("Server", "nginx/1.25"), ("x-powered-by", "PHP/8.2")]),
        );
        assert_eq!(
            hints,
            vec!["Server: nginx/1.25", "Powered-By: PHP/8.2", "Generator: Hugo 0.120.0"]
        );
    }

    #[test]
    fn test_no_hints() {
        let hints = detect_technologies("<p>plain</p>", &headers(&[("server", "  ")]));
        assert!(hints.is_empty());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = [
            TechSignature::new("alpine", "Alpine.js"),
            TechSignature::new("x-data", "Alpine.js"),
        ];
        let html = r#"<div x-data="{}"></div><script src="alpine.js"></script>"#;
        let hints = detect_technologies_with(html, &BTreeMap::new(), &catalog);
        assert_eq!(hints, vec!["Alpine.js"]);
    }
}
