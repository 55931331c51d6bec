//! Page extraction pipeline
//!
//! Turns one fetched page (URL, HTML, response headers) into a `PageRecord`.
//! The transform is deterministic and stateless; every list-valued field is
//! bounded by the caps in `limits`.

mod anchors;
mod dom;
mod forms;
pub mod limits;
mod media;
mod meta;
mod record;
mod structure;
mod structured;
mod tech;
mod text;

pub use anchors::anchor_hrefs;
pub use record::{
    ButtonRecord, FormRecord, HeadingRecord, ImageRecord, InputRecord, LabelRecord, LinkRecord,
    LinkSummary, ListRecord, OptionRecord, PageRecord, PerformanceHints, ScriptRecord,
    StylesheetRecord, TableRecord, TextSummary,
};
pub use tech::{
    detect_technologies, detect_technologies_with, TechSignature, DEFAULT_TECH_SIGNATURES,
};

use limits::{cap_list, MAX_IMAGES, MAX_SCRIPTS, MAX_STYLESHEETS};
use scraper::Html;
use std::collections::BTreeMap;
use url::Url;

/// Extracts a structured record from one page
///
/// # Arguments
///
/// * `url` - The requested URL; relative references resolve against it
/// * `html` - The raw response body
/// * `headers` - The response headers, names lower-cased
///
/// # Example
///
/// ```
/// use site_extractor::page::extract_page;
/// use std::collections::BTreeMap;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// let html = r#"<html><head><title>Example</title></head><body><a href="/about">About</a></body></html>"#;
/// let record = extract_page(&url, html, &BTreeMap::new());
///
/// assert_eq!(record.title, "Example");
/// assert_eq!(record.links.internal.len(), 1);
/// ```
pub fn extract_page(url: &Url, html: &str, headers: &BTreeMap<String, String>) -> PageRecord {
    let document = Html::parse_document(html);

    let page_meta = meta::extract_meta(&document);
    let visible = text::visible_text(&document);

    let images = media::extract_images(&document, url);
    let scripts = media::extract_scripts(&document, url);
    let stylesheets = media::extract_stylesheets(&document, url);

    let performance = PerformanceHints {
        html_size: html.len(),
        image_count: images.len(),
        script_count: scripts.len(),
        stylesheet_count: stylesheets.len(),
        dom_elements: document
            .tree
            .root()
            .descendants()
            .filter(|node| node.value().is_element())
            .count(),
    };

    PageRecord {
        url: url.to_string(),
        title: page_meta.title,
        meta_description: page_meta.description,
        meta_keywords: page_meta.keywords,
        word_count: visible.split_whitespace().count(),
        character_count: visible.chars().count(),
        language: page_meta.language,
        doctype: meta::extract_doctype(html),
        response_headers: headers.clone(),
        status_code: 200,
        meta_tags: page_meta.tags,
        links: anchors::extract_anchors(&document, url),
        images: cap_list(images, MAX_IMAGES),
        scripts: cap_list(scripts, MAX_SCRIPTS),
        stylesheets: cap_list(stylesheets, MAX_STYLESHEETS),
        forms: forms::extract_forms(&document),
        headings: structure::extract_headings(&document),
        tables: structure::extract_tables(&document),
        lists: structure::extract_lists(&document),
        html_comments: structure::extract_comments(&document),
        text_content: text::summarize(&document, &visible),
        structured_data: structured::extract_structured_data(&document),
        open_graph: page_meta.open_graph,
        twitter_cards: page_meta.twitter_cards,
        technology_hints: detect_technologies(html, headers),
        performance,
    }
}
