//! Images, scripts and stylesheets
//!
//! Each extractor returns the full list; capping happens in `extract_page`
//! after the performance counters have been taken.

use super::dom::{attr, has_attr, opt_attr, raw_text, selector};
use super::limits::{truncate_chars, SHORT_TEXT_CHARS};
use super::record::{ImageRecord, ScriptRecord, StylesheetRecord};
use crate::url::normalize_url;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static IMG: Lazy<Selector> = Lazy::new(|| selector("img"));
static SCRIPT: Lazy<Selector> = Lazy::new(|| selector("script"));
static STYLESHEET_LINK: Lazy<Selector> = Lazy::new(|| selector("link[rel~=stylesheet]"));
static STYLE: Lazy<Selector> = Lazy::new(|| selector("style"));

/// Images with a non-empty `src`
pub(crate) fn extract_images(document: &Html, page_url: &Url) -> Vec<ImageRecord> {
    document
        .select(&IMG)
        .filter_map(|img| {
            let src = attr(&img, "src");
            if src.is_empty() {
                return None;
            }
            Some(ImageRecord {
                alt: truncate_chars(&attr(&img, "alt"), SHORT_TEXT_CHARS),
                title: truncate_chars(&attr(&img, "title"), SHORT_TEXT_CHARS),
                width: opt_attr(&img, "width"),
                height: opt_attr(&img, "height"),
                full_url: normalize_url(page_url, &src).map(|url| url.to_string()),
                src,
            })
        })
        .collect()
}

/// Every `<script>`, external or inline
pub(crate) fn extract_scripts(document: &Html, page_url: &Url) -> Vec<ScriptRecord> {
    document
        .select(&SCRIPT)
        .map(|script| {
            let src = attr(&script, "src");
            let content = raw_text(&script);
            ScriptRecord {
                script_type: attr(&script, "type"),
                is_async: has_attr(&script, "async"),
                defer: has_attr(&script, "defer"),
                has_content: !content.trim().is_empty(),
                content_length: content.chars().count(),
                full_url: if src.is_empty() {
                    None
                } else {
                    normalize_url(page_url, &src).map(|url| url.to_string())
                },
                src,
            }
        })
        .collect()
}

/// Linked stylesheets with an `href`, followed by inline `<style>` blocks
pub(crate) fn extract_stylesheets(document: &Html, page_url: &Url) -> Vec<StylesheetRecord> {
    let external = document.select(&STYLESHEET_LINK).filter_map(|link| {
        let href = attr(&link, "href");
        if href.is_empty() {
            return None;
        }
        Some(StylesheetRecord::External {
            media: attr(&link, "media"),
            full_url: normalize_url(page_url, &href).map(|url| url.to_string()),
            href,
        })
    });

    let inline = document.select(&STYLE).map(|style| StylesheetRecord::Inline {
        content_length: raw_text(&style).chars().count(),
    });

    external.chain(inline).collect()
}
