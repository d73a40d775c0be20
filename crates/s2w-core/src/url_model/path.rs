//! Filename extraction from an image `src`.

/// Extracts the last path segment from a URL for use as a filename.
///
/// Absolute URLs go through `url::Url` so percent-encoding and dot segments are
/// normalized; anything else (relative or protocol-relative `src`) is split by
/// hand after dropping the query and fragment.
/// Returns `None` if the path is empty/root.
pub fn filename_from_url_path(src: &str) -> Option<String> {
    let segment = match url::Url::parse(src) {
        Ok(parsed) => last_segment(parsed.path())?.to_string(),
        Err(_) => {
            let end = src.find(['?', '#']).unwrap_or(src.len());
            last_segment(&src[..end])?.to_string()
        }
    };
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

fn last_segment(path: &str) -> Option<&str> {
    path.split('/').filter(|s| !s.is_empty()).last()
}
