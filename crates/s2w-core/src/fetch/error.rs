//! Image fetch error type.

use std::path::PathBuf;

/// Error returned while fetching or saving one image (curl failure, HTTP error, or storage failure).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, DNS, connection, timeout, etc.).
    #[error("GET {url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Response had a non-2xx status and `fail_on_http_error` is set.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing the image to disk failed (e.g. disk full, permission denied).
    #[error("storage: {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
