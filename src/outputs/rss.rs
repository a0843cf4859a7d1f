//! RSS 2.0 serialization.
//!
//! # Output
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>...</title>
//!     <link>...</link>
//!     <description>...</description>
//!     <item>
//!       <title>...</title>
//!       <link>...</link>
//!       <description>...</description>
//!       <category>...</category>
//!       <pubDate>...</pubDate>
//!     </item>
//!   </channel>
//! </rss>
//! ```
//!
//! `<category>` and `<pubDate>` are left out of an item when empty.

use crate::error::FeedError;
use crate::models::{FeedDocument, FeedEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;
use tracing::{info, instrument};

/// Render a [`FeedDocument`] as indented RSS XML, terminated by a newline.
#[instrument(level = "info", skip_all)]
pub fn render_rss(document: &FeedDocument) -> Result<Vec<u8>, FeedError> {
    let channel = document.channel();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", document.version())]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    for entry in &channel.entries {
        write_item(&mut writer, entry)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    info!(bytes = bytes.len(), items = channel.entries.len(), "Rendered RSS feed");
    Ok(bytes)
}

fn write_item<W: Write>(writer: &mut Writer<W>, entry: &FeedEntry) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(writer, "title", &entry.title)?;
    write_text_element(writer, "link", &entry.link)?;
    write_text_element(writer, "description", &entry.description)?;
    if !entry.category.is_empty() {
        write_text_element(writer, "category", &entry.category)?;
    }
    if !entry.pub_date.is_empty() {
        write_text_element(writer, "pubDate", &entry.pub_date)?;
    }
    writer.write_event(Event::End(BytesEnd::new("item")))
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
