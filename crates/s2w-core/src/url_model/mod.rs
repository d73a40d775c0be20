//! Image URL modeling: local filenames and paths for downloaded images.
//!
//! An image is saved under `images/<post_id>/` using the final path segment of
//! its `src`. Two images with the same basename in one post share a path; the
//! later fetch overwrites the earlier one.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use std::path::{Path, PathBuf};

/// Directory (relative to the output root) holding every post's images.
pub const IMAGES_DIR: &str = "images";

/// Filename used when an `src` has no usable path segment.
const DEFAULT_FILENAME: &str = "image.bin";

/// Derives the local filename for an image `src`.
///
/// # Examples
///
/// - `image_filename("https://x.test/a.png")` → `"a.png"`
/// - `image_filename("https://x.test/a.png?w=600")` → `"a.png"`
/// - `image_filename("https://x.test/")` → `"image.bin"`
pub fn image_filename(src: &str) -> String {
    let sanitized = filename_from_url_path(src)
        .map(|raw| sanitize_filename(&raw))
        .unwrap_or_default();
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// `<out_dir>/images/<post_id>`.
pub fn post_image_dir(out_dir: &Path, post_id: &str) -> PathBuf {
    out_dir.join(IMAGES_DIR).join(post_id)
}

/// Path of an image relative to the output root, `/`-separated for use in HTML.
pub fn relative_image_path(post_id: &str, filename: &str) -> String {
    format!("{}/{}/{}", IMAGES_DIR, post_id, filename)
}
