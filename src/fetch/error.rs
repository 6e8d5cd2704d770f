use thiserror::Error;

/// Errors raised while retrieving a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resource location: {0}")]
    InvalidSource(String),

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an empty body")]
    EmptyBody { url: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// True when the resource was reached but its body held no usable content.
    pub fn is_empty_content(&self) -> bool {
        matches!(self, Self::EmptyBody { .. })
    }
}
