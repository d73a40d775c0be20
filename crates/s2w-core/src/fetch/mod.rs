//! Blocking HTTP GET for post images.
//!
//! Uses the curl crate (libcurl) with one Easy handle per request. Fetches run
//! on the calling thread, one after another.

mod error;

pub use error::FetchError;

use crate::config::HttpConfig;
use std::time::Duration;

/// Raw result of one image GET: status code and the body bytes as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchedImage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of image bytes. The exporter calls `fetch` once per `<img>` occurrence.
pub trait ImageFetcher {
    fn fetch(&mut self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// libcurl-backed fetcher. Follows redirects; timeouts only when configured.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    http: HttpConfig,
}

impl CurlFetcher {
    pub fn new(http: &HttpConfig) -> Self {
        Self { http: http.clone() }
    }
}

impl ImageFetcher for CurlFetcher {
    fn fetch(&mut self, url: &str) -> Result<FetchedImage, FetchError> {
        let curl_err = |source: curl::Error| FetchError::Curl {
            url: url.to_string(),
            source,
        };

        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.get(true).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(10).map_err(curl_err)?;
        if let Some(secs) = self.http.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))
                .map_err(curl_err)?;
        }
        if let Some(secs) = self.http.timeout_secs {
            easy.timeout(Duration::from_secs(secs)).map_err(curl_err)?;
        }
        if let Some(ua) = self.http.user_agent.as_deref() {
            easy.useragent(ua).map_err(curl_err)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().map_err(curl_err)?;
        }

        let status = easy.response_code().map_err(curl_err)?;
        tracing::debug!(url, status, bytes = body.len(), "fetched image");
        Ok(FetchedImage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = FetchedImage {
            status: 200,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        let not_found = FetchedImage {
            status: 404,
            body: b"missing".to_vec(),
        };
        assert!(!not_found.is_success());
    }

    #[test]
    fn relative_url_is_a_curl_error() {
        let mut fetcher = CurlFetcher::default();
        let err = fetcher.fetch("/relative/a.png").unwrap_err();
        assert!(matches!(err, FetchError::Curl { .. }));
    }
}
