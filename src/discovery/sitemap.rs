//! Sitemap parsing
//!
//! Sitemaps are scanned with patterns rather than a full XML parser: the
//! only thing needed is the text of `<loc>` elements, and real-world
//! sitemaps are frequently not well-formed.

use once_cell::sync::Lazy;
use regex::Regex;

static LOC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<loc>(.*?)</loc>").expect("loc pattern is valid"));

static SITEMAP_LOC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<sitemap>\s*<loc>(.*?)</loc>").expect("sitemap loc pattern is valid")
});

/// Returns the text of every `<loc>` element, in document order
pub fn parse_locs(xml: &str) -> Vec<String> {
    collect(&LOC, xml)
}

/// Returns the `<loc>` of every `<sitemap>` entry of a sitemap index
pub fn parse_sitemap_index(xml: &str) -> Vec<String> {
    collect(&SITEMAP_LOC, xml)
}

fn collect(pattern: &Regex, xml: &str) -> Vec<String> {
    pattern
        .captures_iter(xml)
        .map(|captures| clean_loc(&captures[1]))
        .filter(|loc| !loc.is_empty())
        .collect()
}

/// Strips whitespace and a CDATA wrapper, and decodes `&amp;`
fn clean_loc(raw: &str) -> String {
    let value = raw.trim();
    let value = value
        .strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(value);
    value.trim().replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc> https://example.com/about </loc></url>
  <url><LOC>https://example.com/contact</LOC></url>
</urlset>"#;

        assert_eq!(
            parse_locs(xml),
            vec![
                "https://example.com/",
                "https://example.com/about",
                "https://example.com/contact",
            ]
        );
        assert!(parse_sitemap_index(xml).is_empty());
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<sitemapindex>
  <sitemap>
    <loc>https://example.com/sitemap-posts.xml</loc>
  </sitemap>
  <sitemap><loc>https://example.com/sitemap-pages.xml</loc></sitemap>
</sitemapindex>"#;

        assert_eq!(
            parse_sitemap_index(xml),
            vec![
                "https://example.com/sitemap-posts.xml",
                "https://example.com/sitemap-pages.xml",
            ]
        );
        assert_eq!(parse_locs(xml).len(), 2);
    }

    #[test]
    fn test_cdata_and_entities() {
        let xml = "<url><loc><![CDATA[https://example.com/?a=1&b=2]]></loc></url>\
                   <url><loc>https://example.com/?c=3&amp;d=4</loc></url>";
        assert_eq!(
            parse_locs(xml),
            vec!["https://example.com/?a=1&b=2", "https://example.com/?c=3&d=4"]
        );
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_locs("").is_empty());
        assert!(parse_locs("<loc></loc><loc>   </loc>").is_empty());
        assert!(parse_locs("<html><body>Not found</body></html>").is_empty());
    }
}
