//! Document structure: headings, tables, lists and comments

use super::dom::{attr, classes, element_text, selector};
use super::limits::{
    cap_list, truncate_chars, CAPTION_CHARS, COMMENT_CHARS, HEADING_CHARS, MAX_COMMENTS,
    MAX_HEADINGS_PER_LEVEL, MAX_LISTS, MAX_LIST_ITEMS, MAX_TABLES, MAX_TABLE_CELLS,
    MAX_TABLE_ROWS, SHORT_TEXT_CHARS,
};
use super::record::{HeadingRecord, ListRecord, TableRecord};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeMap;

static HEADING_LEVELS: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    ["h1", "h2", "h3", "h4", "h5", "h6"]
        .into_iter()
        .map(|level| (level, selector(level)))
        .collect()
});

static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
static CAPTION: Lazy<Selector> = Lazy::new(|| selector("caption"));
static TH: Lazy<Selector> = Lazy::new(|| selector("th"));
static TR: Lazy<Selector> = Lazy::new(|| selector("tr"));
static TD: Lazy<Selector> = Lazy::new(|| selector("td"));
static LIST: Lazy<Selector> = Lazy::new(|| selector("ul, ol"));
static LI: Lazy<Selector> = Lazy::new(|| selector("li"));

pub(crate) fn extract_headings(document: &Html) -> BTreeMap<String, Vec<HeadingRecord>> {
    let mut headings = BTreeMap::new();

    for (level, level_selector) in HEADING_LEVELS.iter() {
        let found: Vec<HeadingRecord> = document
            .select(level_selector)
            .take(MAX_HEADINGS_PER_LEVEL)
            .map(|heading| HeadingRecord {
                text: truncate_chars(&element_text(&heading), HEADING_CHARS),
                id: attr(&heading, "id"),
                class: classes(&heading),
            })
            .collect();

        if !found.is_empty() {
            headings.insert(level.to_string(), found);
        }
    }

    headings
}

pub(crate) fn extract_tables(document: &Html) -> Vec<TableRecord> {
    document
        .select(&TABLE)
        .take(MAX_TABLES)
        .map(|table| TableRecord {
            id: attr(&table, "id"),
            class: classes(&table),
            caption: table
                .select(&CAPTION)
                .next()
                .map(|caption| truncate_chars(&element_text(&caption), CAPTION_CHARS))
                .unwrap_or_default(),
            headers: cells(&table, &TH),
            rows: cap_list(
                table
                    .select(&TR)
                    .map(|row| cells(&row, &TD))
                    .filter(|row| !row.is_empty())
                    .collect(),
                MAX_TABLE_ROWS,
            ),
        })
        .collect()
}

fn cells(parent: &ElementRef<'_>, cell: &Selector) -> Vec<String> {
    parent
        .select(cell)
        .take(MAX_TABLE_CELLS)
        .map(|cell| truncate_chars(&element_text(&cell), SHORT_TEXT_CHARS))
        .collect()
}

pub(crate) fn extract_lists(document: &Html) -> Vec<ListRecord> {
    document
        .select(&LIST)
        .take(MAX_LISTS)
        .map(|list| ListRecord {
            list_type: list.value().name().to_string(),
            id: attr(&list, "id"),
            class: classes(&list),
            items: list
                .select(&LI)
                .take(MAX_LIST_ITEMS)
                .map(|item| truncate_chars(&element_text(&item), SHORT_TEXT_CHARS))
                .collect(),
        })
        .collect()
}

/// Non-empty `<!-- ... -->` comments anywhere in the document, trimmed
pub(crate) fn extract_comments(document: &Html) -> Vec<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Comment(comment) => Some(comment.trim()),
            _ => None,
        })
        .filter(|comment| !comment.is_empty())
        .take(MAX_COMMENTS)
        .map(|comment| truncate_chars(comment, COMMENT_CHARS))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_only_present_levels() {
        let html = Html::parse_document(
            r#"<h1 id="top" class="hero">Welcome <em>home</em></h1>
               <h3>Details</h3><h3>More</h3>"#,
        );
        let headings = extract_headings(&html);

        assert_eq!(headings.keys().collect::<Vec<_>>(), vec!["h1", "h3"]);
        assert_eq!(headings["h1"][0].text, "Welcome home");
        assert_eq!(headings["h1"][0].id, "top");
        assert_eq!(headings["h1"][0].class, vec!["hero"]);
        assert_eq!(headings["h3"].len(), 2);
    }

    #[test]
    fn test_tables() {
        let html = Html::parse_document(
            r#"<table id="prices">
                 <caption>Price list</caption>
                 <tr><th>Plan</th><th>Cost</th></tr>
                 <tr><td>Free</td><td>0</td></tr>
                 <tr><td>Pro</td><td>10</td></tr>
               </table>"#,
        );
        let tables = extract_tables(&html);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].id, "prices");
        assert_eq!(tables[0].caption, "Price list");
        assert_eq!(tables[0].headers, vec!["Plan", "Cost"]);
        assert_eq!(
            tables[0].rows,
            vec![vec!["Free", "0"], vec!["Pro", "10"]]
        );
    }

    #[test]
    fn test_tables_capped() {
        let page: String = (0..15).map(|_| "<table><tr><td>x</td></tr></table>").collect();
        assert_eq!(extract_tables(&Html::parse_document(&page)).len(), MAX_TABLES);
    }

    #[test]
    fn test_lists() {
        let html = Html::parse_document(
            r#"<ul class="nav"><li>Home</li><li><a href="/a">About</a></li></ul>
               <ol id="steps"><li>One</li></ol>"#,
        );
        let lists = extract_lists(&html);

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].list_type, "ul");
        assert_eq!(lists[0].class, vec!["nav"]);
        assert_eq!(lists[0].items, vec!["Home", "About"]);
        assert_eq!(lists[1].list_type, "ol");
        assert_eq!(lists[1].id, "steps");
    }

    #[test]
    fn test_comments() {
        let html = Html::parse_document(
            "<!-- build 1234 --><html><body><!----><p>x</p><!--  debug build  --></body></html>",
        );
        assert_eq!(
            extract_comments(&html),
            vec!["build 1234", "debug build"]
        );
    }
}
