//! Output generation.
//!
//! - [`rss`]: serializes a [`crate::models::FeedDocument`] as an RSS 2.0 document

pub mod rss;
