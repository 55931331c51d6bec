use crate::UrlError;
use url::Url;

/// Reference prefixes that never resolve to a fetchable page
const REJECTED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Resolves a raw reference against a base URL
///
/// # Rejected References
///
/// - empty references
/// - fragment-only references (`#section`)
/// - `javascript:`, `mailto:`, `tel:` and `data:` references
/// - anything that does not resolve to an `http` or `https` URL
///
/// Relative references are resolved per standard URL resolution and the
/// fragment is dropped, so `/a` and `/a#x` name the same page. The
/// function is pure: the same inputs always give the same output, and an
/// absolute http(s) URL resolves to its own canonical form.
///
/// # Examples
///
/// ```
/// use site_extractor::url::normalize_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let url = normalize_url(&base, "../about").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
///
/// assert!(normalize_url(&base, "#top").is_none());
/// assert!(normalize_url(&base, "mailto:team@example.com").is_none());
/// ```
pub fn normalize_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if REJECTED_SCHEMES.iter().any(|scheme| has_prefix_ignore_case(href, scheme)) {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => {
            resolved.set_fragment(None);
            Some(resolved)
        }
        _ => None,
    }
}

/// Normalizes the user-supplied crawl target
///
/// Surrounding whitespace is removed and a missing scheme is upgraded to
/// `https://`. The result must be an http(s) URL with a host.
///
/// # Examples
///
/// ```
/// use site_extractor::url::normalize_target;
///
/// let url = normalize_target("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_target(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let has_scheme =
        has_prefix_ignore_case(raw, "http://") || has_prefix_ignore_case(raw, "https://");
    let candidate = if has_scheme {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}
