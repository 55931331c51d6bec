//! Document metadata: title, meta tags, social cards, language, doctype

use super::dom::{attr, element_text, selector};
use super::limits::{
    cap_insert, truncate_chars, MAX_META_TAGS, MAX_SOCIAL_TAGS, META_CHARS, TITLE_CHARS,
};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META: Lazy<Selector> = Lazy::new(|| selector("meta"));
static HTML: Lazy<Selector> = Lazy::new(|| selector("html"));

static DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\A\s*<!DOCTYPE\s+(.*?)\s*>").expect("doctype pattern is valid"));

/// Metadata gathered from `<head>`
#[derive(Debug, Default)]
pub(crate) struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub language: String,
    pub tags: BTreeMap<String, String>,
    pub open_graph: BTreeMap<String, String>,
    pub twitter_cards: BTreeMap<String, String>,
}

pub(crate) fn extract_meta(document: &Html) -> PageMeta {
    let mut meta = PageMeta {
        title: document
            .select(&TITLE)
            .next()
            .map(|title| truncate_chars(&element_text(&title), TITLE_CHARS))
            .unwrap_or_default(),
        language: document
            .select(&HTML)
            .next()
            .map(|html| attr(&html, "lang"))
            .unwrap_or_default(),
        ..PageMeta::default()
    };

    for tag in document.select(&META) {
        let content = attr(&tag, "content");

        // First non-empty of name, property, http-equiv
        let key = ["name", "property", "http-equiv"]
            .iter()
            .map(|name| attr(&tag, name))
            .find(|value| !value.is_empty())
            .unwrap_or_default()
            .to_lowercase();

        if !key.is_empty() && !content.is_empty() {
            cap_insert(
                &mut meta.tags,
                key.clone(),
                truncate_chars(&content, META_CHARS),
                MAX_META_TAGS,
            );
        }
        match key.as_str() {
            "description" => meta.description = truncate_chars(&content, META_CHARS),
            "keywords" => meta.keywords = truncate_chars(&content, META_CHARS),
            _ => {}
        }

        // Social cards keep the attribute's original case
        let property = Some(attr(&tag, "property"))
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| attr(&tag, "name"));
        let value = truncate_chars(&content, META_CHARS);
        if property.starts_with("og:") {
            cap_insert(&mut meta.open_graph, property, value, MAX_SOCIAL_TAGS);
        } else if property.starts_with("twitter:") {
            cap_insert(&mut meta.twitter_cards, property, value, MAX_SOCIAL_TAGS);
        }
    }

    meta
}

/// Body of a leading `<!DOCTYPE ...>`, or an empty string
pub(crate) fn extract_doctype(html: &str) -> String {
    DOCTYPE
        .captures(html)
        .map(|captures| captures[1].to_string())
        .unwrap_or_default()
}
