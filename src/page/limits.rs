//! Output caps for page records
//!
//! Every list-valued field of a `PageRecord` is bounded so that the payload
//! size does not grow with the page. Truncation always keeps the first
//! items in document order.

use std::collections::BTreeMap;

pub const TITLE_CHARS: usize = 200;
pub const META_CHARS: usize = 500;
pub const SHORT_TEXT_CHARS: usize = 100;
pub const HEADING_CHARS: usize = 200;
pub const CAPTION_CHARS: usize = 200;
pub const COMMENT_CHARS: usize = 500;
pub const RAW_JSON_LD_CHARS: usize = 500;

pub const MAX_LINKS: usize = 50;
pub const MAX_IMAGES: usize = 50;
pub const MAX_SCRIPTS: usize = 50;
pub const MAX_STYLESHEETS: usize = 50;

pub const MAX_FORMS: usize = 20;
pub const MAX_FORM_INPUTS: usize = 50;
pub const MAX_FORM_BUTTONS: usize = 20;
pub const MAX_FORM_LABELS: usize = 50;
pub const MAX_SELECT_OPTIONS: usize = 50;

pub const MAX_HEADINGS_PER_LEVEL: usize = 50;
pub const MAX_TABLES: usize = 10;
pub const MAX_TABLE_CELLS: usize = 50;
pub const MAX_TABLE_ROWS: usize = 50;
pub const MAX_LISTS: usize = 10;
pub const MAX_LIST_ITEMS: usize = 50;
pub const MAX_COMMENTS: usize = 20;

pub const MAX_LINES: usize = 100;
pub const MAX_PARAGRAPHS: usize = 50;
pub const MAX_COMMON_WORDS: usize = 20;
pub const MAX_LONGEST_WORDS: usize = 10;

pub const MAX_STRUCTURED_DATA: usize = 10;
pub const MAX_META_TAGS: usize = 100;
pub const MAX_SOCIAL_TAGS: usize = 50;

/// Keeps the first `cap` items
pub fn cap_list<T>(mut items: Vec<T>, cap: usize) -> Vec<T> {
    items.truncate(cap);
    items
}

/// Keeps the first `max` characters (not bytes)
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Inserts into a bounded map; existing keys are always updated, new keys
/// only while the map is below `cap`
pub fn cap_insert(map: &mut BTreeMap<String, String>, key: String, value: String, cap: usize) {
    if map.len() < cap || map.contains_key(&key) {
        map.insert(key, value);
    }
}
