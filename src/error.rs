// Error types module

use std::fmt;

use crate::fetch::FetchError;
use crate::pipeline::Backing;

/// Why a single source image (or one of its variants) produced no mockup.
///
/// None of these abort a run: the generator logs them, counts the image as
/// skipped and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockupError {
    /// Network or decode problem on a source, template or watermark image
    RetrievalFailure(String),

    /// Nothing opaque was left after background isolation
    EmptyContent,

    /// Referenced template set, template backing or font not found
    MissingAsset(String),

    /// The rule's skipWhite/skipBlack flag rejected the source
    BackingFiltered(Backing),

    /// The rule's crop origin lies outside the source image
    SamplePointOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Output encoding failed
    EncodeFailed(String),

    /// No rule matched the source, or the matching rule says `skip`
    RuleSkipped(String),
}

impl MockupError {
    /// Short stable label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MockupError::RetrievalFailure(_) => "retrieval_failure",
            MockupError::EmptyContent => "empty_content",
            MockupError::MissingAsset(_) => "missing_asset",
            MockupError::BackingFiltered(_) => "backing_filtered",
            MockupError::SamplePointOutOfBounds { .. } => "sample_point_out_of_bounds",
            MockupError::EncodeFailed(_) => "encode_failed",
            MockupError::RuleSkipped(_) => "rule_skipped",
        }
    }
}

impl fmt::Display for MockupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockupError::RetrievalFailure(msg) => write!(f, "Retrieval failed: {}", msg),
            MockupError::EmptyContent => write!(f, "No content left after background removal"),
            MockupError::MissingAsset(msg) => write!(f, "Missing asset: {}", msg),
            MockupError::BackingFiltered(backing) => {
                write!(f, "Source with {} backing filtered by rule", backing)
            }
            MockupError::SamplePointOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Sample point ({}, {}) outside {}x{} source",
                x, y, width, height
            ),
            MockupError::EncodeFailed(msg) => write!(f, "Encoding failed: {}", msg),
            MockupError::RuleSkipped(msg) => write!(f, "Skipped by rule: {}", msg),
        }
    }
}

impl std::error::Error for MockupError {}

impl From<FetchError> for MockupError {
    fn from(err: FetchError) -> Self {
        MockupError::RetrievalFailure(err.to_string())
    }
}
