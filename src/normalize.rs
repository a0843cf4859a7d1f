//! Entry normalization.
//!
//! Turns a [`RawEntry`] into a [`FeedEntry`]:
//!
//! - **Links** are entity-decoded and resolved against the page URL.
//!   Absolute hrefs are kept verbatim. Items without a usable href are
//!   dropped, so every emitted entry links somewhere absolute.
//! - **Dates** in `YYYY.MM.DD` form are read as midnight in the source
//!   timezone and written as an RFC 1123 style timestamp. Anything else
//!   leaves the publication date empty.
//! - **Titles** are composed with date and category or passed through,
//!   depending on [`TitleStrategy`].

use crate::config::{CompiledConfig, TitleStrategy};
use crate::models::{FeedEntry, RawEntry};
use crate::utils::{clean_text, truncate_for_log};
use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};
use url::{ParseError, Url};

/// Date layout used by the listing page.
pub const SOURCE_DATE_FORMAT: &str = "%Y.%m.%d";

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}$").unwrap());

/// Output layout for `<pubDate>`, e.g. `Fri, 15 Mar 2024 00:00:00 JST`.
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Resolve an href from the page against the page URL.
///
/// HTML entities are decoded before parsing. If the decoded href already
/// parses as an absolute URL, the href is returned exactly as given (only
/// trimmed); otherwise the decoded form is joined onto `base` following
/// RFC 3986 reference resolution.
pub fn resolve_link(href: &str, base: &Url) -> Result<String, ParseError> {
    let decoded = html_escape::decode_html_entities(href);
    let decoded = decoded.trim();
    match Url::parse(decoded) {
        Ok(_) => Ok(href.trim().to_string()),
        Err(ParseError::RelativeUrlWithoutBase) => base.join(decoded).map(String::from),
        Err(e) => Err(e),
    }
}

/// Parse a `YYYY.MM.DD` date as local midnight in `timezone` and format it
/// with [`PUB_DATE_FORMAT`]. Returns `None` for anything that does not match.
///
/// The shape is checked first: chrono alone accepts signed or short years
/// and single-digit months and days.
pub fn normalize_date(text: &str, timezone: Tz) -> Option<String> {
    let text = text.trim();
    if !DATE_SHAPE.is_match(text) {
        return None;
    }
    let date = NaiveDate::parse_from_str(text, SOURCE_DATE_FORMAT).ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let local = timezone.from_local_datetime(&midnight).earliest()?;
    Some(local.format(PUB_DATE_FORMAT).to_string())
}

/// Build the display title for an item.
///
/// With [`TitleStrategy::Compose`] the result is `"<date> [<category>] <title>"`;
/// a missing date or category is left out rather than rendered as an empty
/// slot. [`TitleStrategy::Passthrough`] returns `title` as is.
pub fn compose_title(
    strategy: TitleStrategy,
    date_text: Option<&str>,
    category: &str,
    title: &str,
) -> String {
    match strategy {
        TitleStrategy::Passthrough => title.to_string(),
        TitleStrategy::Compose => {
            let date = date_text.map(str::trim).unwrap_or_default();
            let category = category.trim();
            let mut parts = Vec::with_capacity(3);
            if !date.is_empty() {
                parts.push(date.to_string());
            }
            if !category.is_empty() {
                parts.push(format!("[{category}]"));
            }
            parts.push(title.to_string());
            parts.join(" ")
        }
    }
}

/// Normalize a single entry. `None` means the entry was dropped.
pub fn normalize_entry(index: usize, raw: RawEntry, config: &CompiledConfig) -> Option<FeedEntry> {
    let link = {
        let Some(href) = raw.href.as_deref().map(str::trim).filter(|h| !h.is_empty()) else {
            warn!(index, title = %raw.title, "Item has no link; dropping");
            return None;
        };
        match resolve_link(href, &config.source_url) {
            Ok(link) => link,
            Err(e) => {
                warn!(
                    index,
                    href = %truncate_for_log(href, 200),
                    error = %e,
                    "Failed to parse link; dropping item"
                );
                return None;
            }
        }
    };

    let pub_date = match raw.date_text.as_deref() {
        Some(text) => normalize_date(text, config.timezone).unwrap_or_else(|| {
            warn!(index, date = %text, "Failed to parse date; leaving pubDate empty");
            String::new()
        }),
        None => {
            warn!(index, "Item has no date; leaving pubDate empty");
            String::new()
        }
    };

    let title = clean_text(&raw.title);
    let category = clean_text(&raw.category);
    let entry = FeedEntry {
        title: compose_title(
            config.title_strategy,
            raw.date_text.as_deref(),
            &category,
            &title,
        ),
        link,
        category,
        description: clean_text(&raw.description),
        pub_date,
    };
    debug!(index, link = %entry.link, pub_date = %entry.pub_date, "Normalized item");
    Some(entry)
}

/// Normalize every entry, keeping document order and skipping dropped ones.
#[instrument(level = "info", skip_all, fields(count = raw_entries.len()))]
pub fn normalize_entries(raw_entries: Vec<RawEntry>, config: &CompiledConfig) -> Vec<FeedEntry> {
    let total = raw_entries.len();
    let entries: Vec<FeedEntry> = raw_entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| normalize_entry(index, raw, config))
        .collect();

    info!(
        kept = entries.len(),
        dropped = total - entries.len(),
        "Normalized listing items"
    );
    entries
}
