//! Page retrieval and parsing.
//!
//! The listing page is fetched once with a plain `GET`, then handed to
//! `scraper` for parsing. Both steps are fatal on failure:
//!
//! 1. **Fetching**: [`fetch_page`] downloads the body; transport errors and
//!    non-2xx statuses abort the run
//!    ([`read_page_file`] stands in for it on offline runs)
//! 2. **Loading**: [`load_document`] turns the body into a queryable tree
//!
//! Item extraction lives in [`listing`].

pub mod listing;

use crate::error::FeedError;
use reqwest::get;
use scraper::Html;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Fetch the listing page body.
///
/// # Errors
///
/// [`FeedError::Fetch`] for transport or body-read failures and
/// [`FeedError::Status`] for any non-2xx response.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_page(url: &Url) -> Result<String, FeedError> {
    let to_fetch_error = |source: reqwest::Error| FeedError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = get(url.as_str()).await.map_err(to_fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await.map_err(to_fetch_error)?;
    info!(status = status.as_u16(), bytes = body.len(), "Fetched listing page");
    Ok(body)
}

/// Read a saved listing page from disk instead of fetching it.
#[instrument(level = "info")]
pub async fn read_page_file(path: &str) -> Result<String, FeedError> {
    let body = fs::read_to_string(path).await.map_err(|e| FeedError::Input {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    info!(bytes = body.len(), "Read listing page from file");
    Ok(body)
}

/// Parse a page body into an HTML tree.
///
/// The HTML5 parser recovers from malformed markup on its own, so its
/// recoverable errors are only logged. A body with no content at all
/// cannot be a listing page and is rejected.
#[instrument(level = "info", skip_all, fields(bytes = body.len()))]
pub fn load_document(body: &str) -> Result<Html, FeedError> {
    if body.trim().is_empty() {
        return Err(FeedError::Document("response body is empty".to_string()));
    }

    let document = Html::parse_document(body);
    if !document.errors.is_empty() {
        debug!(
            count = document.errors.len(),
            first = %document.errors[0],
            "HTML parser recovered from markup errors"
        );
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_page_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news_list.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/news_list.php", server.uri())).unwrap();
        let body = fetch_page(&url).await.unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/news_list.php", server.uri())).unwrap();
        match fetch_page(&url).await {
            Err(FeedError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_transport_failure() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let url = Url::parse("http://127.0.0.1:9/news_list.php").unwrap();
        assert!(matches!(
            fetch_page(&url).await,
            Err(FeedError::Fetch { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_page_file_missing_is_input_error() {
        match read_page_file("/nonexistent/news_list.html").await {
            Err(FeedError::Input { path, reason }) => {
                assert_eq!(path, "/nonexistent/news_list.html");
                assert!(!reason.is_empty());
            }
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_page_file_returns_contents() {
        let path = std::env::temp_dir().join(format!("upfc_rss_page_{}.html", std::process::id()));
        tokio::fs::write(&path, "<ul class=\"news_ul\"></ul>").await.unwrap();

        let body = read_page_file(path.to_str().unwrap()).await.unwrap();
        assert_eq!(body, "<ul class=\"news_ul\"></ul>");
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn test_load_document_rejects_empty_body() {
        assert!(matches!(
            load_document("  \n "),
            Err(FeedError::Document(_))
        ));
    }

    #[test]
    fn test_load_document_tolerates_broken_markup() {
        let document = load_document("<ul><li><a href='/x'>unclosed").unwrap();
        let selector = scraper::Selector::parse("li a").unwrap();
        assert_eq!(document.select(&selector).count(), 1);
    }
}
