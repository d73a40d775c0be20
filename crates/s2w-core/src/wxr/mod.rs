//! WordPress eXtended RSS (WXR 1.2) output.
//!
//! Items are collected in order and rendered in one pass: XML declaration,
//! `<rss>` with the five WXR namespaces, a single `<channel>`, then one
//! `<item>` per post. Indentation is two spaces. Fields WordPress reads as raw
//! text are written as CDATA sections.

mod item;

pub use item::{post_name, WxrItem};

use anyhow::{Context, Result};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

pub const EXCERPT_NAMESPACE: &str = "http://wordpress.org/export/1.2/excerpt/";
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
pub const WFW_NAMESPACE: &str = "http://wellformedweb.org/CommentAPI/";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const WP_NAMESPACE: &str = "http://wordpress.org/export/1.2/";

/// Output file name under the output directory.
pub const OUTPUT_FILENAME: &str = "wordpress_export.xml";

const INDENT: usize = 2;

/// Collects items for one WXR document.
#[derive(Debug, Default)]
pub struct WxrWriter {
    items: Vec<WxrItem>,
}

impl WxrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: WxrItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[WxrItem] {
        &self.items
    }

    /// Renders the whole document as UTF-8 bytes, newline-terminated.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("rss").with_attributes([
            ("xmlns:excerpt", EXCERPT_NAMESPACE),
            ("xmlns:content", CONTENT_NAMESPACE),
            ("xmlns:wfw", WFW_NAMESPACE),
            ("xmlns:dc", DC_NAMESPACE),
            ("xmlns:wp", WP_NAMESPACE),
            ("version", "2.0"),
        ])))?;

        if self.items.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("channel")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("channel")))?;
            for item in &self.items {
                write_item(&mut writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("channel")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Writes `<out_dir>/wordpress_export.xml`, creating `out_dir` if needed.
    pub fn write_to_dir(&self, out_dir: &Path) -> Result<std::path::PathBuf> {
        let bytes = self.to_bytes()?;
        fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir {}", out_dir.display()))?;
        let path = out_dir.join(OUTPUT_FILENAME);
        fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &WxrItem) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", &item.title)?;
    text_element(writer, "link", &item.link)?;
    text_element(writer, "dc:creator", &item.creator)?;

    writer.write_event(Event::Start(
        BytesStart::new("guid").with_attributes([("isPermaLink", "false")]),
    ))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(&item.guid))))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    writer.write_event(Event::Empty(BytesStart::new("description")))?;
    cdata_element(writer, "content:encoded", &item.content)?;
    writer.write_event(Event::Empty(BytesStart::new("excerpt:encoded")))?;

    text_element(writer, "pubDate", &item.pub_date)?;
    cdata_element(writer, "wp:post_date", &item.post_date)?;
    cdata_element(writer, "wp:post_date_gmt", &item.post_date_gmt)?;
    cdata_element(writer, "wp:post_modified", &item.post_date)?;
    cdata_element(writer, "wp:post_modified_gmt", &item.post_date_gmt)?;
    cdata_element(writer, "wp:comment_status", "open")?;
    cdata_element(writer, "wp:ping_status", "open")?;
    cdata_element(writer, "wp:post_name", &item.post_name)?;
    cdata_element(writer, "wp:status", "publish")?;
    text_element(writer, "wp:post_parent", "0")?;
    text_element(writer, "wp:menu_order", "0")?;
    cdata_element(writer, "wp:post_type", "post")?;
    cdata_element(writer, "wp:post_password", "")?;
    text_element(writer, "wp:is_sticky", "0")?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// `<name>escaped text</name>`; empty text still gets an open/close pair.
fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    // A Text event (even empty) keeps the closing tag on the same line.
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn cdata_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    // `escaped` splits a literal `]]>` across adjacent sections.
    for cdata in BytesCData::escaped(text) {
        writer.write_event(Event::CData(cdata))?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
