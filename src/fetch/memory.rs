//! In-memory fetcher backed by a URL table.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::{FetchError, Fetcher};

/// Serves pre-registered bodies; unknown URLs answer with a 404 status.
///
/// Used for offline runs and tests. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    entries: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the body served for `url`.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<Bytes>) {
        self.entries.write().insert(url.into(), body.into());
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let body = self.entries.read().get(url).cloned();

        match body {
            Some(body) if body.is_empty() => Err(FetchError::EmptyBody {
                url: url.to_string(),
            }),
            Some(body) => Ok(body),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
