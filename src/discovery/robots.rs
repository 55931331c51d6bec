//! Robots.txt sitemap directives
//!
//! Only `Sitemap:` lines are consumed; crawl directives (`Disallow`,
//! `Crawl-delay`, ...) are deliberately ignored.

/// Extracts the value of every `Sitemap:` directive
///
/// The directive name is matched case-insensitively and may appear in any
/// user-agent group. Comments after `#` are stripped.
///
/// # Examples
///
/// ```
/// use site_extractor::discovery::parse_sitemap_directives;
///
/// let robots = "User-agent: *\nDisallow: /admin\nSitemap: https://example.com/sitemap.xml";
/// assert_eq!(
///     parse_sitemap_directives(robots),
///     vec!["https://example.com/sitemap.xml".to_string()]
/// );
/// ```
pub fn parse_sitemap_directives(robots: &str) -> Vec<String> {
    robots
        .lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or("").trim();
            let (key, value) = line.split_once(':')?;
            if !key.trim().eq_ignore_ascii_case("sitemap") {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}
