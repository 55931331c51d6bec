//! Visible text and word analytics
//!
//! Visible text is every text node outside `script`, `style`, `noscript`
//! and `template`, concatenated in document order.
//!
//! Tie-breaks:
//! - most common words: higher count first, then first occurrence
//! - longest words: longer first, then lexical order

use super::dom::{element_text, selector};
use super::limits::{MAX_COMMON_WORDS, MAX_LINES, MAX_LONGEST_WORDS, MAX_PARAGRAPHS};
use super::record::TextSummary;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};
use std::collections::{BTreeSet, HashMap};

const HIDDEN_CONTAINERS: &[&str] = &["script", "style", "noscript", "template"];

const MIN_COMMON_WORD_LEN: usize = 3;
const MIN_LONG_WORD_LEN: usize = 5;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern is valid"));

pub(crate) fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| HIDDEN_CONTAINERS.contains(&element.name()));
        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}

pub(crate) fn summarize(document: &Html, text: &str) -> TextSummary {
    TextSummary {
        lines: text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_LINES)
            .map(str::to_string)
            .collect(),
        paragraphs: document
            .select(&PARAGRAPH)
            .map(|p| element_text(&p))
            .filter(|p| !p.is_empty())
            .take(MAX_PARAGRAPHS)
            .collect(),
        most_common_words: most_common_words(text, MAX_COMMON_WORDS),
        longest_words: longest_words(text, MAX_LONGEST_WORDS),
    }
}

/// Case-folded words of at least three letters, by frequency
pub(crate) fn most_common_words(text: &str, n: usize) -> Vec<String> {
    // word -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    let words = WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.len() >= MIN_COMMON_WORD_LEN);
    for (position, word) in words.enumerate() {
        counts
            .entry(word.to_lowercase())
            .or_insert((0, position))
            .0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (a_count, a_pos)), (_, (b_count, b_pos))| {
        b_count.cmp(a_count).then(a_pos.cmp(b_pos))
    });
    ranked.into_iter().take(n).map(|(word, _)| word).collect()
}

/// Distinct case-preserved words of at least five letters, longest first
pub(crate) fn longest_words(text: &str, n: usize) -> Vec<String> {
    let unique: BTreeSet<&str> = WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.len() >= MIN_LONG_WORD_LEN)
        .collect();

    let mut words: Vec<&str> = unique.into_iter().collect();
    // stable sort keeps lexical order within equal lengths
    words.sort_by(|a, b| b.len().cmp(&a.len()));
    words.into_iter().take(n).map(str::to_string).collect()
}
