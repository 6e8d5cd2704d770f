//! Watermark configuration types.
//!
//! A template set carries a single `watermark_text` value. It is turned into
//! a [`WatermarkSpec`] once, at deserialisation time:
//!
//! ```yaml
//! template_sets:
//!   classic:
//!     watermark_text: "ACME STORE"                    # text watermark
//!   branded:
//!     watermark_text: "https://cdn.example.com/logo.png"  # image watermark
//! ```
//!
//! An absent or empty value means no watermark.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{
    DEFAULT_WATERMARK_FONT_SIZE, DEFAULT_WATERMARK_MARGIN_BOTTOM, DEFAULT_WATERMARK_MARGIN_RIGHT,
    DEFAULT_WATERMARK_MAX_WIDTH, DEFAULT_WATERMARK_TEXT_ALPHA,
};

// Default values
fn default_max_width() -> u32 {
    DEFAULT_WATERMARK_MAX_WIDTH
}

fn default_margin_right() -> u32 {
    DEFAULT_WATERMARK_MARGIN_RIGHT
}

fn default_margin_bottom() -> u32 {
    DEFAULT_WATERMARK_MARGIN_BOTTOM
}

fn default_font_size() -> f32 {
    DEFAULT_WATERMARK_FONT_SIZE
}

fn default_text_alpha() -> u8 {
    DEFAULT_WATERMARK_TEXT_ALPHA
}

/// What to stamp on a finished mockup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkSpec {
    /// Remote image, fetched once per run and scaled down to `max_width`
    Image { source: String },
    /// Literal text rendered with a fixed-size bold font
    Text { text: String },
}

impl WatermarkSpec {
    /// Interpret a configured watermark value.
    ///
    /// `http://` and `https://` values reference an image; any other
    /// non-blank value is literal text. Blank values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(Self::Image {
                source: raw.to_string(),
            })
        } else {
            Some(Self::Text {
                text: raw.to_string(),
            })
        }
    }

    /// The configured value this spec was parsed from.
    pub fn as_config_str(&self) -> &str {
        match self {
            Self::Image { source } => source,
            Self::Text { text } => text,
        }
    }
}

impl Serialize for WatermarkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_config_str())
    }
}

/// Deserialize an optional `watermark_text` value into a spec.
pub fn deserialize_watermark_spec<'de, D>(
    deserializer: D,
) -> Result<Option<WatermarkSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(WatermarkSpec::parse))
}

/// Placement and rendering parameters shared by both watermark kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatermarkStyle {
    /// Image watermarks wider than this are downscaled (default: 280)
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Gap to the right edge in pixels (default: 20)
    #[serde(default = "default_margin_right")]
    pub margin_right: u32,

    /// Gap to the bottom edge in pixels (default: 50)
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: u32,

    /// Text size in pixels (default: 100)
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Text alpha, drawn in black (default: 128)
    #[serde(default = "default_text_alpha")]
    pub text_alpha: u8,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            font_size: default_font_size(),
            text_alpha: default_text_alpha(),
        }
    }
}

impl WatermarkStyle {
    /// Validate the style.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_width == 0 {
            return Err("Watermark max_width must be greater than 0".to_string());
        }

        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(format!(
                "Watermark font_size must be a positive finite value, got {}",
                self.font_size
            ));
        }

        Ok(())
    }
}
