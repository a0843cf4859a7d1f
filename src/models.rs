//! Data models for one feed run.
//!
//! - [`RawEntry`]: a listing item exactly as found in the markup
//! - [`FeedEntry`]: the normalized, output-ready item
//! - [`FeedChannel`]: channel metadata plus the ordered items
//! - [`FeedDocument`]: the versioned top-level document handed to the renderer
//!
//! Everything here is created and consumed within a single run.

/// RSS version written into every [`FeedDocument`].
pub const RSS_VERSION: &str = "2.0";

/// One listing item as extracted from the page, before normalization.
///
/// `href` is `None` when the item has no anchor or the anchor carries no
/// `href` attribute. The normalizer decides what happens to such items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Title text, already cleaned. May be empty.
    pub title: String,
    /// The anchor's `href` attribute, untouched.
    pub href: Option<String>,
    /// Date node text with the category text excluded. `None` if the item has no date node.
    pub date_text: Option<String>,
    /// Category node text. Empty when the node is missing.
    pub category: String,
    /// Description text, already cleaned.
    pub description: String,
}

/// A normalized item ready to be written as an RSS `<item>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Display title, composed or passed through depending on the title strategy.
    pub title: String,
    /// Absolute URL of the news article.
    pub link: String,
    /// Category label. Kept as an empty string when the listing has none.
    pub category: String,
    pub description: String,
    /// RFC 1123 style timestamp, or empty if the source date was missing or unparseable.
    pub pub_date: String,
}

/// Channel metadata and items in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedChannel {
    pub title: String,
    /// The listing page the feed was generated from.
    pub link: String,
    pub description: String,
    pub entries: Vec<FeedEntry>,
}

/// The complete feed document.
///
/// Built once by [`crate::feed::build_feed`] and rendered exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    version: &'static str,
    channel: FeedChannel,
}

impl FeedDocument {
    pub(crate) fn new(channel: FeedChannel) -> Self {
        Self {
            version: RSS_VERSION,
            channel,
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn channel(&self) -> &FeedChannel {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_entry_default_is_empty() {
        let raw = RawEntry::default();
        assert!(raw.title.is_empty());
        assert!(raw.href.is_none());
        assert!(raw.date_text.is_none());
        assert_eq!(raw.category, "");
    }

    #[test]
    fn test_feed_document_version_is_fixed() {
        let doc = FeedDocument::new(FeedChannel {
            title: "Test".to_string(),
            link: "https://example.test/".to_string(),
            description: "Desc".to_string(),
            entries: vec![],
        });

        assert_eq!(doc.version(), "2.0");
        assert_eq!(doc.channel().title, "Test");
        assert!(doc.channel().entries.is_empty());
    }
}
