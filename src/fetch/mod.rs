//! Retrieval of source artwork, templates and watermark images.
//!
//! Everything the generator downloads goes through the [`Fetcher`] trait so
//! the pipeline can run against the network ([`HttpFetcher`]) or an
//! in-memory table ([`MemoryFetcher`]) without changes.
//!
//! # Supported Sources
//!
//! - `https://example.com/art.png` and `http://...` - fetched over HTTP
//! - `file:///abs/path.png` or a bare filesystem path - read from disk

pub mod error;
pub mod http;
pub mod memory;

pub use error::FetchError;
pub use http::{FetcherConfig, HttpFetcher};
pub use memory::MemoryFetcher;

use async_trait::async_trait;
use bytes::Bytes;
use image::RgbaImage;

use crate::imaging::decode;

/// Parsed location of a fetchable resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// `http://` or `https://` URL
    Http(String),
    /// Local file path
    File(String),
}

impl ResourceSource {
    /// Parse a location string.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidSource`] for blank input and for
    /// schemes other than http, https and file.
    pub fn parse(source: &str) -> Result<Self, FetchError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FetchError::InvalidSource(
                "empty resource location".to_string(),
            ));
        }

        if source.starts_with("https://") || source.starts_with("http://") {
            return Ok(Self::Http(source.to_string()));
        }
        if let Some(path) = source.strip_prefix("file://") {
            if path.is_empty() {
                return Err(FetchError::InvalidSource(source.to_string()));
            }
            return Ok(Self::File(path.to_string()));
        }
        if source.contains("://") {
            return Err(FetchError::InvalidSource(format!(
                "unsupported scheme in {source}; use http://, https:// or file://"
            )));
        }
        Ok(Self::File(source.to_string()))
    }
}

/// Byte-level retrieval of a resource by URL or path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the raw bytes behind `url`.
    ///
    /// An empty body is reported as [`FetchError::EmptyBody`], never as
    /// successful zero-length content.
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Fetch `url` and decode it into an RGBA image.
pub async fn fetch_image(fetcher: &dyn Fetcher, url: &str) -> Result<RgbaImage, FetchError> {
    let bytes = fetcher.fetch(url).await?;
    decode(&bytes).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
