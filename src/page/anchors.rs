//! Anchor records, split into internal and external

use super::dom::{attr, element_text, selector};
use super::limits::{cap_list, truncate_chars, MAX_LINKS, SHORT_TEXT_CHARS};
use super::record::{LinkRecord, LinkSummary};
use crate::url::{domain_label, host_contains_label, normalize_url};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// Collects every `<a href>` of the page
///
/// A link is internal when its resolved host contains the page's domain
/// label. References that do not resolve (fragments, `mailto:`, ...) count
/// toward `total` but land in neither bucket.
pub(crate) fn extract_anchors(document: &Html, page_url: &Url) -> LinkSummary {
    let label = domain_label(page_url);
    let mut summary = LinkSummary::default();
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for anchor in document.select(&ANCHOR) {
        summary.total += 1;

        let href = attr(&anchor, "href");
        let resolved = normalize_url(page_url, &href);
        let is_internal = match (&resolved, &label) {
            (Some(url), Some(label)) => host_contains_label(url, label),
            _ => false,
        };

        let record = LinkRecord {
            text: truncate_chars(&element_text(&anchor), SHORT_TEXT_CHARS),
            full_url: resolved.as_ref().map(Url::to_string),
            title: truncate_chars(&attr(&anchor, "title"), SHORT_TEXT_CHARS),
            rel: attr(&anchor, "rel")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            href,
        };

        match resolved {
            Some(_) if is_internal => internal.push(record),
            Some(_) => external.push(record),
            None => {}
        }
    }

    summary.internal = cap_list(internal, MAX_LINKS);
    summary.external = cap_list(external, MAX_LINKS);
    summary
}

/// Distinct raw `href` values of every anchor, first-seen order
pub fn anchor_hrefs(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    let hrefs = document
        .select(&ANCHOR)
        .map(|anchor| attr(&anchor, "href"))
        .filter(|href| seen.insert(href.clone()))
        .take(limit)
        .collect();
    hrefs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://www.example.com/docs/").unwrap()
    }

    #[test]
    fn test_internal_external_split() {
        let html = Html::parse_document(
            r##"
            <a href="/about" title="About us" rel="nofollow noopener">About <b>us</b></a>
            <a href="https://blog.example.com/post">Blog</a>
            <a href="https://other.org/">Other</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="#top">Top</a>
            <a>No href</a>
            "##,
        );

        let links = extract_anchors(&html, &page_url());

        assert_eq!(links.total, 5);
        assert_eq!(links.internal.len(), 2);
        assert_eq!(links.external.len(), 1);

        let about = &links.internal[0];
        assert_eq!(about.text, "About us");
        assert_eq!(about.href, "/about");
        assert_eq!(
            about.full_url.as_deref(),
            Some("https://www.example.com/about")
        );
        assert_eq!(about.title, "About us");
        assert_eq!(about.rel, vec!["nofollow", "noopener"]);

        assert_eq!(
            links.external[0].full_url.as_deref(),
            Some("https://other.org/")
        );
    }

    #[test]
    fn test_links_capped_but_total_counted() {
        let body: String = (0..80)
            .map(|i| format!(r#"<a href="/page-{}">p</a>"#, i))
            .collect();
        let links = extract_anchors(&Html::parse_document(&body), &page_url());

        assert_eq!(links.total, 80);
        assert_eq!(links.internal.len(), MAX_LINKS);
        assert_eq!(links.internal[0].href, "/page-0");
    }

    #[test]
    fn test_anchor_hrefs_unique_in_order() {
        let html = r#"<a href="/b">1</a><a href="/a">2</a><a href="/b">3</a><a>4</a><a href="mailto:x@y.z">5</a>"#;
        assert_eq!(anchor_hrefs(html, 10), vec!["/b", "/a", "mailto:x@y.z"]);
        assert_eq!(anchor_hrefs(html, 1), vec!["/b"]);
    }
}
