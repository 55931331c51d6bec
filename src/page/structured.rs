//! JSON-LD structured data

use super::dom::{raw_text, selector};
use super::limits::{truncate_chars, MAX_STRUCTURED_DATA, RAW_JSON_LD_CHARS};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{json, Value};

static JSON_LD: Lazy<Selector> =
    Lazy::new(|| selector(r#"script[type="application/ld+json"]"#));

/// Parses every non-empty JSON-LD block
///
/// Blocks that are not valid JSON are kept as `{"raw": <first 500 chars>}`.
pub(crate) fn extract_structured_data(document: &Html) -> Vec<Value> {
    document
        .select(&JSON_LD)
        .map(|script| raw_text(&script))
        .filter(|body| !body.trim().is_empty())
        .take(MAX_STRUCTURED_DATA)
        .map(|body| {
            serde_json::from_str(&body)
                .unwrap_or_else(|_| json!({ "raw": truncate_chars(&body, RAW_JSON_LD_CHARS) }))
        })
        .collect()
}
