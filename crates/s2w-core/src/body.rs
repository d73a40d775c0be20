//! Post body HTML: image discovery, serialization, optional image relinking.
//!
//! Bodies are parsed as HTML5 fragments with `scraper`; serialization is the
//! fragment's inner HTML, so the emitted content is the normalized tree rather
//! than the input bytes. Relinking is a streaming pass over that serialization
//! with `lol_html`.

use anyhow::{anyhow, Context, Result};
use lol_html::{element, HtmlRewriter, Settings};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

use crate::url_model;

/// A parsed post body.
pub struct PostBody {
    document: Html,
}

impl PostBody {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_fragment(html);
        if !document.errors.is_empty() {
            tracing::trace!(errors = document.errors.len(), "html parse recovered from errors");
        }
        Self { document }
    }

    /// Reads and parses `path`. Non-UTF-8 content is an error.
    pub fn read(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("read post body {}", path.display()))?;
        Ok(Self::parse(&html))
    }

    /// `src` of every `<img>` that has one, in document order (duplicates kept).
    pub fn image_sources(&self) -> Result<Vec<String>> {
        let selector = img_selector()?;
        Ok(self
            .document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .map(str::to_string)
            .collect())
    }

    /// Serialized HTML of the fragment.
    pub fn to_html(&self) -> String {
        self.document.root_element().inner_html()
    }
}

fn img_selector() -> Result<Selector> {
    Selector::parse("img[src]").map_err(|e| anyhow!("img selector: {}", e))
}

/// Rewrites every `<img src>` to `images/<post_id>/<filename>`.
///
/// Returns the rewritten HTML and the number of tags changed.
pub fn relink_images(html: &str, post_id: &str) -> Result<(String, usize)> {
    let mut output = Vec::with_capacity(html.len());
    let mut rewritten = 0usize;

    {
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("img[src]", |el| {
                    if let Some(src) = el.get_attribute("src") {
                        let filename = url_model::image_filename(&src);
                        el.set_attribute(
                            "src",
                            &url_model::relative_image_path(post_id, &filename),
                        )?;
                        rewritten += 1;
                    }
                    Ok(())
                })],
                ..Settings::default()
            },
            |c: &[u8]| output.extend_from_slice(c),
        );

        rewriter
            .write(html.as_bytes())
            .map_err(|e| anyhow!("HTML rewrite error: {}", e))?;
        rewriter
            .end()
            .map_err(|e| anyhow!("HTML rewrite finalization error: {}", e))?;
    }

    let result = String::from_utf8(output).context("Invalid UTF-8 in rewritten HTML")?;
    Ok((result, rewritten))
}
