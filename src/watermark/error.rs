//! Watermark error types.
//!
//! Defines errors that can occur while resolving or applying watermarks.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// Failed to fetch watermark image from source
    FetchError(String),

    /// Failed to decode or scale watermark image
    DecodeError(String),

    /// Failed to render text watermark
    RenderError(String),

    /// No usable font could be loaded for a text watermark
    FontUnavailable(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchError(msg) => write!(f, "Failed to fetch watermark: {}", msg),
            Self::DecodeError(msg) => write!(f, "Failed to decode watermark image: {}", msg),
            Self::RenderError(msg) => write!(f, "Failed to render text watermark: {}", msg),
            Self::FontUnavailable(msg) => write!(f, "No watermark font available: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}
