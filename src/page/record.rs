//! Page record types
//!
//! Everything the extraction pipeline produces for one page. Records are
//! plain data: built once by `extract_page` and serialized as-is into the
//! advanced-mode response.

use serde::Serialize;
use std::collections::BTreeMap;

/// Structured extraction result for one fetched page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageRecord {
    /// The URL that was requested (not the post-redirect URL)
    pub url: String,

    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,

    /// Whitespace-separated words of the visible text
    pub word_count: usize,

    /// Characters of the visible text
    pub character_count: usize,

    /// Value of `<html lang>`
    pub language: String,

    /// Body of a leading `<!DOCTYPE ...>` declaration
    pub doctype: String,

    pub response_headers: BTreeMap<String, String>,
    pub status_code: u16,

    /// Lower-cased meta name/property/http-equiv to content
    pub meta_tags: BTreeMap<String, String>,

    pub links: LinkSummary,
    pub images: Vec<ImageRecord>,
    pub scripts: Vec<ScriptRecord>,
    pub stylesheets: Vec<StylesheetRecord>,
    pub forms: Vec<FormRecord>,

    /// `h1`..`h6`; only levels present on the page appear
    pub headings: BTreeMap<String, Vec<HeadingRecord>>,

    pub tables: Vec<TableRecord>,
    pub lists: Vec<ListRecord>,
    pub html_comments: Vec<String>,
    pub text_content: TextSummary,

    /// Parsed JSON-LD blocks, or `{"raw": ...}` for blocks that fail to parse
    pub structured_data: Vec<serde_json::Value>,

    pub open_graph: BTreeMap<String, String>,
    pub twitter_cards: BTreeMap<String, String>,
    pub technology_hints: Vec<String>,
    pub performance: PerformanceHints,
}

/// Anchors of a page split by whether they stay on the target site
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkSummary {
    /// Every `<a href>` on the page, before capping
    pub total: usize,
    pub internal: Vec<LinkRecord>,
    pub external: Vec<LinkRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,

    /// Absolute URL, or `None` for rejected references (`mailto:`, fragments, ...)
    pub full_url: Option<String>,

    pub title: String,
    pub rel: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageRecord {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub full_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScriptRecord {
    pub src: String,

    #[serde(rename = "type")]
    pub script_type: String,

    #[serde(rename = "async")]
    pub is_async: bool,

    pub defer: bool,
    pub has_content: bool,
    pub content_length: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
}

/// A `<link rel="stylesheet">` or an inline `<style>` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StylesheetRecord {
    External {
        href: String,
        media: String,
        full_url: Option<String>,
    },
    Inline {
        content_length: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormRecord {
    pub action: String,

    /// Upper-cased, `GET` when absent
    pub method: String,

    pub enctype: String,
    pub target: String,
    pub id: String,
    pub name: String,
    pub class: Vec<String>,
    pub inputs: Vec<InputRecord>,
    pub buttons: Vec<ButtonRecord>,
    pub labels: Vec<LabelRecord>,
}

/// An `<input>`, `<textarea>` or `<select>` inside a form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputRecord {
    pub tag: String,

    /// `text` when absent
    #[serde(rename = "type")]
    pub input_type: String,

    pub name: String,
    pub id: String,
    pub class: Vec<String>,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub maxlength: Option<String>,
    pub minlength: Option<String>,
    pub pattern: String,
    pub autocomplete: String,
    pub aria_label: String,

    /// Present for `<select>` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptionRecord {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ButtonRecord {
    /// `submit` when absent
    #[serde(rename = "type")]
    pub button_type: String,

    pub name: String,
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelRecord {
    #[serde(rename = "for")]
    pub for_id: String,

    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadingRecord {
    pub text: String,
    pub id: String,
    pub class: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRecord {
    pub id: String,
    pub class: Vec<String>,
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListRecord {
    /// `ul` or `ol`
    #[serde(rename = "type")]
    pub list_type: String,

    pub id: String,
    pub class: Vec<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextSummary {
    pub lines: Vec<String>,
    pub paragraphs: Vec<String>,
    pub most_common_words: Vec<String>,
    pub longest_words: Vec<String>,
}

/// Size counters, computed before any list is capped
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceHints {
    /// Bytes of HTML
    pub html_size: usize,
    pub image_count: usize,
    pub script_count: usize,
    pub stylesheet_count: usize,
    pub dom_elements: usize,
}
