use url::{Host, Url};

/// Second-level labels that form a public suffix together with a
/// two-letter country code (`example.co.uk`, `example.com.au`)
const SECOND_LEVEL_SUFFIXES: &[&str] = &["ac", "co", "com", "edu", "gov", "net", "org", "ne", "or"];

/// Extracts the lowercase host of a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the registrable domain label used for same-site checks
///
/// The label is the part of the host directly left of its public suffix:
/// `www.example.com` and `shop.example.co.uk` both give `example`. IP
/// addresses and single-label hosts such as `localhost` give the whole
/// host. Suffix detection is a small built-in heuristic, not a full
/// public-suffix list.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_extractor::url::domain_label;
///
/// let url = Url::parse("https://blog.example.com/post").unwrap();
/// assert_eq!(domain_label(&url), Some("example".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(domain_label(&url), Some("127.0.0.1".to_string()));
/// ```
pub fn domain_label(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
        Host::Domain(domain) => Some(label_of(&domain.to_lowercase())),
    }
}

/// Returns true if the URL's host contains the given domain label
pub fn host_contains_label(url: &Url, label: &str) -> bool {
    extract_domain(url).map_or(false, |host| host.contains(label))
}

fn label_of(domain: &str) -> String {
    let labels: Vec<&str> = domain
        .trim_end_matches('.')
        .split('.')
        .filter(|l| !l.is_empty())
        .collect();

    match labels.len() {
        0 => domain.to_string(),
        1 => labels[0].to_string(),
        n => {
            let tld = labels[n - 1];
            let second = labels[n - 2];
            if n >= 3 && tld.len() == 2 && SECOND_LEVEL_SUFFIXES.contains(&second) {
                labels[n - 3].to_string()
            } else {
                second.to_string()
            }
        }
    }
}
