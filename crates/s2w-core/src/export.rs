//! Substack export → WXR conversion.
//!
//! One pass over the manifest: for each row with a body, fetch its images to
//! `images/<post_id>/`, then build an item. Any error aborts the run; the XML
//! file is only written once every post has been processed.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};

use crate::body::{self, PostBody};
use crate::config::ExportConfig;
use crate::dates::{self, PostDates};
use crate::fetch::{CurlFetcher, FetchError, FetchedImage, ImageFetcher};
use crate::manifest::{self, PostRecord};
use crate::url_model;
use crate::wxr::{WxrItem, WxrWriter};

/// Counts for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Manifest rows read.
    pub posts: usize,
    /// Items written (rows with a body).
    pub items: usize,
    /// Rows skipped for lack of a body.
    pub skipped: usize,
    /// Images fetched and saved.
    pub images: usize,
    /// Path of the written WXR file.
    pub output: PathBuf,
}

/// Converts one export directory using a caller-supplied fetcher.
pub struct Exporter<F> {
    config: ExportConfig,
    zone: FixedOffset,
    fetcher: F,
}

impl Exporter<CurlFetcher> {
    /// Exporter fetching over HTTP with libcurl.
    pub fn with_curl(config: ExportConfig) -> Result<Self> {
        let fetcher = CurlFetcher::new(&config.http);
        Self::new(config, fetcher)
    }
}

impl<F: ImageFetcher> Exporter<F> {
    pub fn new(config: ExportConfig, fetcher: F) -> Result<Self> {
        config.validate()?;
        let zone = dates::target_offset(config.target_offset_minutes)?;
        Ok(Self {
            config,
            zone,
            fetcher,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the conversion from `in_dir` into `out_dir`.
    pub fn run(&mut self, in_dir: &Path, out_dir: &Path) -> Result<ExportSummary> {
        let records = manifest::read_manifest(in_dir)?;
        tracing::info!(
            posts = records.len(),
            "exporting {} -> {}",
            in_dir.display(),
            out_dir.display()
        );

        let mut wxr = WxrWriter::new();
        let mut images = 0usize;
        for record in &records {
            let body_path = record.body_path(in_dir);
            if !body_path.is_file() {
                tracing::debug!(post_id = %record.post_id, "no body at {}, skipping", body_path.display());
                continue;
            }
            let (item, fetched) = self
                .process_post(record, &body_path, out_dir)
                .with_context(|| format!("post {}", record.post_id))?;
            images += fetched;
            wxr.push(item);
        }

        let output = wxr.write_to_dir(out_dir)?;
        let items = wxr.items().len();
        let summary = ExportSummary {
            posts: records.len(),
            items,
            skipped: records.len() - items,
            images,
            output,
        };
        tracing::info!(
            items = summary.items,
            skipped = summary.skipped,
            images = summary.images,
            "wrote {}",
            summary.output.display()
        );
        Ok(summary)
    }

    /// Builds the item for one post, saving its images along the way.
    /// Returns the item and the number of images saved.
    fn process_post(
        &mut self,
        record: &PostRecord,
        body_path: &Path,
        out_dir: &Path,
    ) -> Result<(WxrItem, usize)> {
        let post_body = PostBody::read(body_path)?;
        let sources = post_body.image_sources()?;

        let image_dir = url_model::post_image_dir(out_dir, &record.post_id);
        for src in &sources {
            let filename = url_model::image_filename(src);
            let fetched = self.fetcher.fetch(src)?;
            self.check_status(src, &fetched)?;
            save_image(&image_dir, &filename, &fetched.body)?;
        }

        let mut content = post_body.to_html();
        if self.config.relink_images {
            let (relinked, count) = body::relink_images(&content, &record.post_id)?;
            tracing::debug!(post_id = %record.post_id, count, "relinked images");
            content = relinked;
        }

        let dates = PostDates::parse(&record.post_date, self.zone)?;
        let item = WxrItem::new(
            &record.post_id,
            &record.title,
            self.config.post_link(&record.post_id),
            content,
            &dates,
        );
        tracing::debug!(post_id = %record.post_id, images = sources.len(), "built item");
        Ok((item, sources.len()))
    }

    fn check_status(&self, url: &str, fetched: &FetchedImage) -> Result<(), FetchError> {
        if fetched.is_success() {
            return Ok(());
        }
        if self.config.http.fail_on_http_error {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: fetched.status,
            });
        }
        tracing::warn!(url, status = fetched.status, "image response not successful, saving body anyway");
        Ok(())
    }
}

/// Writes image bytes to `<dir>/<filename>`, creating `dir` on first use.
fn save_image(dir: &Path, filename: &str, bytes: &[u8]) -> Result<(), FetchError> {
    fs::create_dir_all(dir).map_err(|source| FetchError::Storage {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(filename);
    fs::write(&path, bytes).map_err(|source| FetchError::Storage {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Converts `in_dir` into `out_dir` with the default libcurl fetcher.
pub fn export(in_dir: &Path, out_dir: &Path, config: ExportConfig) -> Result<ExportSummary> {
    Exporter::with_curl(config)?.run(in_dir, out_dir)
}
