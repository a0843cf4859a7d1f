//! The end-to-end run: fetch, load, extract, normalize, build, render.
//!
//! Each stage runs once, in order, on the current task. Fatal problems come
//! back as [`FeedError`]; per-item problems are handled inside the
//! normalizer and never stop the run.

use crate::config::CompiledConfig;
use crate::error::FeedError;
use crate::feed::build_feed_for;
use crate::normalize::normalize_entries;
use crate::outputs::rss::render_rss;
use crate::scrapers::listing::extract_entries;
use crate::scrapers::{fetch_page, load_document};
use tracing::instrument;

/// Fetch the configured page and render it as an RSS document.
#[instrument(level = "info", skip_all, fields(url = %config.source_url))]
pub async fn run(config: &CompiledConfig) -> Result<Vec<u8>, FeedError> {
    let body = fetch_page(&config.source_url).await?;
    build_from_html(&body, config)
}

/// Everything after the fetch, for a page body already in hand.
pub fn build_from_html(body: &str, config: &CompiledConfig) -> Result<Vec<u8>, FeedError> {
    let document = load_document(body)?;
    let raw_entries = extract_entries(&document, &config.selectors);
    let entries = normalize_entries(raw_entries, config);
    let feed = build_feed_for(config, entries);
    render_rss(&feed)
}
