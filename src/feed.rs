//! Feed assembly.

use crate::config::CompiledConfig;
use crate::models::{FeedChannel, FeedDocument, FeedEntry};
use tracing::{info, instrument};

/// Wrap channel metadata and the normalized entries into a [`FeedDocument`].
///
/// Entries are taken as given: no filtering, no sorting. An empty list
/// still produces a valid channel.
#[instrument(level = "info", skip_all, fields(count = entries.len()))]
pub fn build_feed(
    title: &str,
    link: &str,
    description: &str,
    entries: Vec<FeedEntry>,
) -> FeedDocument {
    let document = FeedDocument::new(FeedChannel {
        title: title.to_string(),
        link: link.to_string(),
        description: description.to_string(),
        entries,
    });
    info!(version = document.version(), "Built feed document");
    document
}

/// [`build_feed`] with the channel metadata taken from the run configuration.
pub fn build_feed_for(config: &CompiledConfig, entries: Vec<FeedEntry>) -> FeedDocument {
    build_feed(
        &config.channel_title,
        config.source_url.as_str(),
        &config.channel_description,
        entries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedConfig;

    fn entry(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            link: format!("https://example.test/{title}"),
            category: String::new(),
            description: title.to_string(),
            pub_date: String::new(),
        }
    }

    #[test]
    fn test_build_feed_keeps_entry_order() {
        let doc = build_feed(
            "Title",
            "https://example.test/list",
            "Desc",
            vec![entry("c"), entry("a"), entry("b")],
        );
        let titles: Vec<_> = doc.channel().entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["c", "a", "b"]);
        assert_eq!(doc.version(), "2.0");
    }

    #[test]
    fn test_build_feed_with_no_entries() {
        let doc = build_feed("Title", "https://example.test/list", "Desc", vec![]);
        assert!(doc.channel().entries.is_empty());
        assert_eq!(doc.channel().link, "https://example.test/list");
    }

    #[test]
    fn test_build_feed_for_uses_config_metadata() {
        let config = FeedConfig::default().compile().unwrap();
        let doc = build_feed_for(&config, vec![entry("x")]);
        assert_eq!(doc.channel().title, "Hello! Project News");
        assert_eq!(doc.channel().description, "Latest news from Hello! Project");
        assert_eq!(
            doc.channel().link,
            "https://www.upfc.jp/helloproject/news_list.php?@rst=all"
        );
    }
}
