//! Substack `posts.csv` manifest.
//!
//! Columns are matched by header name; `post_id`, `title` and `post_date` are
//! required and any other Substack columns (`subtitle`, `audience`, ...) are
//! ignored. Row order is output order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Manifest file name inside the export directory.
pub const MANIFEST_FILENAME: &str = "posts.csv";
/// Directory of per-post HTML bodies inside the export directory.
pub const POSTS_DIR: &str = "posts";

/// One manifest row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    pub post_id: String,
    pub title: String,
    pub post_date: String,
}

impl PostRecord {
    /// `<in_dir>/posts/<post_id>.html`.
    pub fn body_path(&self, in_dir: &Path) -> PathBuf {
        in_dir.join(POSTS_DIR).join(format!("{}.html", self.post_id))
    }
}

/// Reads `<in_dir>/posts.csv`. A missing file or any bad row is an error.
pub fn read_manifest(in_dir: &Path) -> Result<Vec<PostRecord>> {
    let path = in_dir.join(MANIFEST_FILENAME);
    let file = std::fs::File::open(&path)
        .with_context(|| format!("open manifest {}", path.display()))?;
    let records =
        parse_manifest(file).with_context(|| format!("parse manifest {}", path.display()))?;
    tracing::debug!(count = records.len(), "read manifest {}", path.display());
    Ok(records)
}

/// Parses manifest CSV from any reader.
pub fn parse_manifest<R: Read>(reader: R) -> Result<Vec<PostRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<PostRecord>().enumerate() {
        // Row 1 is the header.
        let record = row.with_context(|| format!("row {}", index + 2))?;
        records.push(record);
    }
    Ok(records)
}
