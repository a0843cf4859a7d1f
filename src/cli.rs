//! Command-line interface definitions.
//!
//! The feed itself goes to stdout, so every option here only picks which
//! configuration to run with or where the page comes from.

use crate::config::Preset;
use clap::Parser;

/// Command-line arguments for upfc_rss.
///
/// # Examples
///
/// ```sh
/// # Default layout, fetched live
/// upfc_rss > news.xml
///
/// # Another built-in layout
/// upfc_rss --preset static > news.xml
///
/// # Custom selectors from YAML, page saved locally
/// upfc_rss --config feed.yaml --html saved_page.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Built-in listing layout to use
    #[arg(short, long, value_enum, default_value_t = Preset::Ctg00)]
    pub preset: Preset,

    /// Path to a YAML feed configuration; takes precedence over --preset
    #[arg(short, long)]
    pub config: Option<String>,

    /// Read the listing from this HTML file instead of fetching it
    #[arg(long)]
    pub html: Option<String>,
}
