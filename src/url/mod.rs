//! URL handling module for Site Extractor
//!
//! This module provides reference resolution, target normalization, and
//! the domain-label derivation used to decide what counts as "same site".

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{domain_label, extract_domain, host_contains_label};
pub use normalize::{normalize_target, normalize_url};

/// Returns the origin of a URL (`scheme://host[:port]/`) as a base for
/// well-known paths such as `/robots.txt`
pub fn origin_of(url: &url::Url) -> url::Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}
