//! Network and filesystem fetcher.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use std::time::Duration;

use super::{FetchError, Fetcher, ResourceSource};
use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetches `http(s)://` URLs with reqwest and `file://` paths from disk.
///
/// Requests carry a browser user agent and a `Referer` equal to the
/// requested URL; several artwork CDNs refuse hotlinking without them.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built
    /// (TLS initialisation failure, invalid user agent).
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| FetchError::Client(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<Bytes, FetchError> {
        let mut request = self.client.get(url);
        if let Ok(referer) = HeaderValue::from_str(url) {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })?;

        non_empty(url, bytes)
    }

    async fn fetch_file(&self, path: &str) -> Result<Bytes, FetchError> {
        let data = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.to_string(),
            source,
        })?;
        non_empty(path, Bytes::from(data))
    }
}

fn non_empty(url: &str, bytes: Bytes) -> Result<Bytes, FetchError> {
    if bytes.is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }
    Ok(bytes)
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let bytes = match ResourceSource::parse(url)? {
            ResourceSource::Http(url) => self.fetch_http(&url).await?,
            ResourceSource::File(path) => self.fetch_file(&path).await?,
        };

        tracing::debug!(url = %url, bytes = bytes.len(), "Fetched resource");
        Ok(bytes)
    }
}
