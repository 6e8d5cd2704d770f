//! Template set configuration.
//!
//! A template set names a pair of blank apparel templates (one for light
//! sources, one for dark), the region the design is fitted into, the
//! watermark and the title decoration for its outputs.

use serde::{Deserialize, Serialize};

use crate::imaging::RegionSpec;
use crate::watermark::{deserialize_watermark_spec, WatermarkSpec, WatermarkStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSetConfig {
    /// Template used for sources with a white backing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,

    /// Template used for sources with a black backing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,

    /// Region of the template the design is fitted into
    pub coords: RegionSpec,

    /// Watermark: an http(s) URL for an image, otherwise literal text
    #[serde(
        default,
        rename = "watermark_text",
        deserialize_with = "deserialize_watermark_spec",
        skip_serializing_if = "Option::is_none"
    )]
    pub watermark: Option<WatermarkSpec>,

    #[serde(default)]
    pub watermark_style: WatermarkStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_prefix_to_add: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_suffix_to_add: Option<String>,
}

impl TemplateSetConfig {
    pub fn title_prefix(&self) -> &str {
        self.title_prefix_to_add.as_deref().unwrap_or("")
    }

    pub fn title_suffix(&self) -> &str {
        self.title_suffix_to_add.as_deref().unwrap_or("")
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        if self.coords.w == 0 || self.coords.h == 0 {
            return Err(format!(
                "Template set '{}' has an empty region ({}x{})",
                name, self.coords.w, self.coords.h
            ));
        }
        if self.white.is_none() && self.black.is_none() {
            return Err(format!(
                "Template set '{}' defines neither a white nor a black template",
                name
            ));
        }
        self.watermark_style
            .validate()
            .map_err(|e| format!("Template set '{}': {}", name, e))
    }
}
