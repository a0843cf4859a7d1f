//! Listing extractor.
//!
//! Walks the parsed page with the configured [`ListingSelectors`] and turns
//! every matched item into a [`RawEntry`], in document order.
//!
//! # Item layout
//!
//! ```html
//! <li>
//!   <a href="/helloproject/news_detail.php?@uid=...">
//!     <p class="news__date">2024.03.15<span class="news__ctg">Info</span></p>
//!     <p class="news__txt">Announcement</p>
//!   </a>
//! </li>
//! ```
//!
//! The category node sits inside the date node. The date text is read as
//! "date node text minus category node text" over the untouched tree, so
//! extraction never mutates the document and items cannot affect each other.

use crate::config::ListingSelectors;
use crate::models::RawEntry;
use crate::utils::clean_text;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

/// Extract one [`RawEntry`] per item matched by `selectors.item`.
///
/// Items with missing pieces still produce an entry with those fields left
/// empty; nothing in here fails the run.
#[instrument(level = "info", skip_all)]
pub fn extract_entries(document: &Html, selectors: &ListingSelectors) -> Vec<RawEntry> {
    let entries: Vec<RawEntry> = document
        .select(&selectors.item)
        .enumerate()
        .map(|(index, item)| extract_entry(index, item, selectors))
        .collect();

    info!(count = entries.len(), "Extracted listing items");
    entries
}

fn extract_entry(index: usize, item: ElementRef<'_>, selectors: &ListingSelectors) -> RawEntry {
    let description_from = |fallback: &str| match &selectors.description {
        Some(selector) => first_text(item, selector),
        None => fallback.to_string(),
    };

    let Some(anchor) = item.select(&selectors.anchor).next() else {
        warn!(index, "List item has no anchor");
        return RawEntry {
            description: description_from(""),
            ..RawEntry::default()
        };
    };

    let title = selectors
        .title
        .as_ref()
        .and_then(|selector| anchor.select(selector).next())
        .map(element_text)
        .unwrap_or_else(|| text_excluding(anchor, &selectors.date));

    let (date_text, category) = match anchor.select(&selectors.date).next() {
        Some(date_node) => (
            Some(text_excluding(date_node, &selectors.category)),
            first_text(date_node, &selectors.category),
        ),
        None => (None, String::new()),
    };

    let entry = RawEntry {
        href: anchor.value().attr("href").map(str::to_string),
        date_text,
        category,
        description: description_from(&title),
        title,
    };
    debug!(index, ?entry, "Extracted item");
    entry
}

/// Cleaned text of an element and all its descendants.
fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Cleaned text of the first match of `selector` under `scope`, or empty.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Cleaned text of `root`, skipping every subtree matched by `excluded`.
fn text_excluding(root: ElementRef<'_>, excluded: &Selector) -> String {
    let skipped: Vec<_> = root.select(excluded).map(|el| el.id()).collect();
    let text: String = root
        .descendants()
        .filter(|node| !node.ancestors().any(|a| skipped.contains(&a.id())))
        .filter_map(|node| node.value().as_text())
        .map(|t| &**t)
        .collect();
    clean_text(&text)
}
