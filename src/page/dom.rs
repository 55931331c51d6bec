//! Small DOM helpers shared by the extractors

use scraper::{ElementRef, Selector};

/// Parses a selector literal
///
/// Only used for compile-time constant selectors held in statics.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

/// Attribute value, or an empty string
pub(crate) fn attr(element: &ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().to_string()
}

/// Attribute value when present
pub(crate) fn opt_attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(str::to_string)
}

pub(crate) fn has_attr(element: &ElementRef<'_>, name: &str) -> bool {
    element.value().attr(name).is_some()
}

pub(crate) fn classes(element: &ElementRef<'_>) -> Vec<String> {
    element.value().classes().map(str::to_string).collect()
}

/// Visible text of an element: trimmed fragments joined by a single space
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw text content of an element, untrimmed (script and style bodies)
pub(crate) fn raw_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
