//! Pipeline configuration.
//!
//! [`FeedConfig`] holds everything that varies between listing layouts:
//! the page URL, the CSS selectors used to pull fields out of each item,
//! the source timezone and how display titles are built. Three built-in
//! [`Preset`]s cover the known layouts; a YAML file can describe any other.
//!
//! A [`FeedConfig`] is plain strings. [`FeedConfig::compile`] validates it
//! into a [`CompiledConfig`] before any network traffic happens, so a bad
//! selector or timezone fails the run up front.

use crate::error::FeedError;
use chrono_tz::Tz;
use clap::ValueEnum;
use scraper::Selector;
use serde::Deserialize;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

const UPFC_NEWS_URL: &str = "https://www.upfc.jp/helloproject/news_list.php?@rst=all";
const CHANNEL_TITLE: &str = "Hello! Project News";
const CHANNEL_DESCRIPTION: &str = "Latest news from Hello! Project";

/// How the display title of an item is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStrategy {
    /// `"<date> [<category>] <title>"`
    #[default]
    Compose,
    /// The raw title text, unchanged.
    Passthrough,
}

/// Built-in configurations for the known variants of the listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Items under the `ctg00` category tab, titles composed with date and category.
    #[default]
    Ctg00,
    /// Every news list on the page, titles passed through, description from the text span.
    All,
    /// Only lists that are not animated carousels.
    Static,
}

/// Configuration for one feed run.
///
/// Missing YAML keys fall back to the [`Preset::Ctg00`] values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub source_url: String,
    /// Selects one element per news item.
    pub item_selector: String,
    /// Selects the link element inside an item.
    pub anchor_selector: String,
    /// Selects the title text inside the anchor. `None` uses the anchor's own text.
    pub title_selector: Option<String>,
    /// Selects the date node inside the anchor.
    pub date_selector: String,
    /// Selects the category node inside the date node.
    pub category_selector: String,
    /// Selects the description inside the item. `None` echoes the title.
    pub description_selector: Option<String>,
    /// IANA zone the listing dates are expressed in.
    pub timezone: String,
    pub title_strategy: TitleStrategy,
    pub channel_title: String,
    pub channel_description: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::preset(Preset::Ctg00)
    }
}

impl FeedConfig {
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            source_url: UPFC_NEWS_URL.to_string(),
            item_selector: "div[data-category='ctg00'] ul.news_ul li".to_string(),
            anchor_selector: "a".to_string(),
            title_selector: Some(".news__txt".to_string()),
            date_selector: ".news__date".to_string(),
            category_selector: ".news__ctg".to_string(),
            description_selector: None,
            timezone: "Asia/Tokyo".to_string(),
            title_strategy: TitleStrategy::Compose,
            channel_title: CHANNEL_TITLE.to_string(),
            channel_description: CHANNEL_DESCRIPTION.to_string(),
        };

        match preset {
            Preset::Ctg00 => base,
            Preset::All => Self {
                item_selector: "ul.news_ul li".to_string(),
                description_selector: Some(".news__txt".to_string()),
                title_strategy: TitleStrategy::Passthrough,
                ..base
            },
            Preset::Static => Self {
                item_selector: "ul.news_ul:not(.animated) li".to_string(),
                ..base
            },
        }
    }

    /// Validate every field and pre-parse selectors, base URL and timezone.
    pub fn compile(&self) -> Result<CompiledConfig, FeedError> {
        let source_url = Url::parse(&self.source_url).map_err(|source| FeedError::BaseUrl {
            url: self.source_url.clone(),
            source,
        })?;
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|_| FeedError::Timezone(self.timezone.clone()))?;

        let selectors = ListingSelectors {
            item: parse_selector("item", &self.item_selector)?,
            anchor: parse_selector("anchor", &self.anchor_selector)?,
            title: parse_optional_selector("title", self.title_selector.as_deref())?,
            date: parse_selector("date", &self.date_selector)?,
            category: parse_selector("category", &self.category_selector)?,
            description: parse_optional_selector(
                "description",
                self.description_selector.as_deref(),
            )?,
        };

        Ok(CompiledConfig {
            source_url,
            selectors,
            timezone,
            title_strategy: self.title_strategy,
            channel_title: self.channel_title.clone(),
            channel_description: self.channel_description.clone(),
        })
    }
}

/// Selectors used by the extractor, parsed once per run.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub item: Selector,
    pub anchor: Selector,
    pub title: Option<Selector>,
    pub date: Selector,
    pub category: Selector,
    pub description: Option<Selector>,
}

/// A validated [`FeedConfig`].
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub source_url: Url,
    pub selectors: ListingSelectors,
    pub timezone: Tz,
    pub title_strategy: TitleStrategy,
    pub channel_title: String,
    pub channel_description: String,
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, FeedError> {
    Selector::parse(selector).map_err(|e| FeedError::Selector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn parse_optional_selector(
    field: &'static str,
    selector: Option<&str>,
) -> Result<Option<Selector>, FeedError> {
    match selector.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_selector(field, s).map(Some),
        None => Ok(None),
    }
}

/// Load a [`FeedConfig`] from a YAML file.
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<FeedConfig, FeedError> {
    let raw = fs::read_to_string(path).await.map_err(|e| FeedError::Config {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let config: FeedConfig = serde_yaml::from_str(&raw).map_err(|e| FeedError::Config {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    info!(source_url = %config.source_url, "Loaded feed configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ctg00_preset() {
        let config = FeedConfig::default();
        assert_eq!(config, FeedConfig::preset(Preset::Ctg00));
        assert_eq!(config.item_selector, "div[data-category='ctg00'] ul.news_ul li");
        assert_eq!(config.title_strategy, TitleStrategy::Compose);
        assert!(config.description_selector.is_none());
    }

    #[test]
    fn test_presets_differ_only_in_variant_fields() {
        let all = FeedConfig::preset(Preset::All);
        assert_eq!(all.item_selector, "ul.news_ul li");
        assert_eq!(all.title_strategy, TitleStrategy::Passthrough);
        assert_eq!(all.description_selector.as_deref(), Some(".news__txt"));

        let fixed = FeedConfig::preset(Preset::Static);
        assert_eq!(fixed.item_selector, "ul.news_ul:not(.animated) li");
        assert_eq!(fixed.timezone, "Asia/Tokyo");
        assert_eq!(fixed.source_url, all.source_url);
    }

    #[test]
    fn test_every_preset_compiles() {
        for preset in [Preset::Ctg00, Preset::All, Preset::Static] {
            let compiled = FeedConfig::preset(preset).compile().unwrap();
            assert_eq!(compiled.timezone, chrono_tz::Asia::Tokyo);
            assert_eq!(compiled.source_url.host_str(), Some("www.upfc.jp"));
        }
    }

    #[test]
    fn test_compile_rejects_bad_selector() {
        let config = FeedConfig {
            date_selector: "[[".to_string(),
            ..FeedConfig::default()
        };
        match config.compile() {
            Err(FeedError::Selector { field, .. }) => assert_eq!(field, "date"),
            other => panic!("expected selector error, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_rejects_unknown_timezone() {
        let config = FeedConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(config.compile(), Err(FeedError::Timezone(_))));
    }

    #[test]
    fn test_compile_rejects_relative_base_url() {
        let config = FeedConfig {
            source_url: "/news_list.php".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(config.compile(), Err(FeedError::BaseUrl { .. })));
    }

    #[test]
    fn test_blank_optional_selector_means_none() {
        let config = FeedConfig {
            description_selector: Some("  ".to_string()),
            ..FeedConfig::default()
        };
        let compiled = config.compile().unwrap();
        assert!(compiled.selectors.description.is_none());
    }

    #[test]
    fn test_yaml_overrides_fall_back_to_defaults() {
        let yaml = r#"
source_url: "https://example.test/list?x=1"
item_selector: "ul.news li"
title_strategy: passthrough
"#;
        let config: FeedConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.source_url, "https://example.test/list?x=1");
        assert_eq!(config.item_selector, "ul.news li");
        assert_eq!(config.title_strategy, TitleStrategy::Passthrough);
        assert_eq!(config.date_selector, ".news__date");
        assert_eq!(config.timezone, "Asia/Tokyo");
    }

    #[tokio::test]
    async fn test_load_config_missing_file_is_config_error() {
        let result = load_config("/nonexistent/feed.yaml").await;
        assert!(matches!(result, Err(FeedError::Config { .. })));
    }
}
