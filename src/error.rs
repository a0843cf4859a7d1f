//! Fatal errors that abort a feed run.
//!
//! Anything in here terminates the process with a failure status. Problems
//! with a single listing item never surface as a [`FeedError`]; the
//! normalizer drops or degrades that item and logs it instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to read listing page from {path}: {reason}")]
    Input { path: String, reason: String },

    #[error("unusable HTML document: {0}")]
    Document(String),

    #[error("invalid base URL \"{url}\": {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid {field} selector \"{selector}\": {reason}")]
    Selector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("unknown timezone \"{0}\"")]
    Timezone(String),

    #[error("config error for {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("failed to render feed: {0}")]
    Render(#[from] std::io::Error),
}
