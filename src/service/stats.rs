//! Aggregate counters over crawled pages

use super::report::ContentAnalysis;
use crate::page::PageRecord;
use std::collections::BTreeSet;
use std::time::Duration;

impl ContentAnalysis {
    /// Sums content counters over every crawled page
    ///
    /// Image and script totals use the uncapped performance counters.
    pub fn from_pages(pages: &[PageRecord]) -> Self {
        pages.iter().fold(Self::default(), |mut totals, page| {
            totals.total_forms += page.forms.len();
            totals.total_images += page.performance.image_count;
            totals.total_scripts += page.performance.script_count;
            totals.total_links += page.links.total;
            totals.word_count += page.word_count;
            totals
        })
    }
}

/// Page URLs plus the resolved URLs of their internal links, sorted
pub fn collect_site_urls(pages: &[PageRecord]) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    for page in pages {
        urls.insert(page.url.clone());
        urls.extend(
            page.links
                .internal
                .iter()
                .filter_map(|link| link.full_url.clone()),
        );
    }
    urls
}

/// Elapsed seconds rounded to two decimals
pub fn elapsed_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
