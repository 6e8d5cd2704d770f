//! Watermark resolution and application.
//!
//! A configured [`WatermarkSpec`] is resolved once per template set into a
//! ready-to-paste [`Watermark`]: image watermarks are fetched and downscaled,
//! text watermarks get their font. Applying a resolved watermark is then a
//! pure, synchronous operation on the finished mockup.

use ab_glyph::FontArc;
use image::RgbaImage;
use std::path::Path;

use super::config::{WatermarkSpec, WatermarkStyle};
use super::position::{bottom_right, ImageDimensions, PlacementPosition, WatermarkDimensions};
use super::text_renderer::{load_font, render_text, TextRenderOptions};
use super::WatermarkError;
use crate::fetch::{fetch_image, Fetcher};
use crate::imaging::{limit_width, paste_with_alpha};

/// A watermark ready to be stamped onto mockups.
#[derive(Clone)]
pub enum Watermark {
    /// Decoded image, already limited to the style's maximum width
    Image(RgbaImage),
    /// Text plus the font it renders with
    Text { text: String, font: FontArc },
}

impl std::fmt::Debug for Watermark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(image) => f
                .debug_tuple("Image")
                .field(&(image.width(), image.height()))
                .finish(),
            Self::Text { text, .. } => f.debug_struct("Text").field("text", text).finish(),
        }
    }
}

/// Outcome of resolving a template set's watermark for one run.
#[derive(Debug, Clone)]
pub enum ResolvedWatermark {
    /// No watermark configured, or its image could not be retrieved
    Absent,
    Ready(Watermark),
    /// The watermark needs an asset that is missing (no usable font)
    Unavailable(WatermarkError),
}

impl ResolvedWatermark {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Resolve `spec` into a ready watermark.
///
/// Image retrieval failures drop the watermark (the mockup is still
/// produced); a text watermark without any loadable font is `Unavailable`.
pub async fn resolve_watermark(
    spec: Option<&WatermarkSpec>,
    style: &WatermarkStyle,
    fetcher: &dyn Fetcher,
    font_path: Option<&Path>,
) -> ResolvedWatermark {
    match spec {
        None => ResolvedWatermark::Absent,
        Some(WatermarkSpec::Image { source }) => {
            match load_image_watermark(source, style, fetcher).await {
                Ok(image) => ResolvedWatermark::Ready(Watermark::Image(image)),
                Err(e) => {
                    tracing::warn!(
                        source = %source,
                        error = %e,
                        "Watermark image unavailable, mockups will not be watermarked"
                    );
                    ResolvedWatermark::Absent
                }
            }
        }
        Some(WatermarkSpec::Text { text }) => match load_font(font_path) {
            Ok(font) => ResolvedWatermark::Ready(Watermark::Text {
                text: text.clone(),
                font,
            }),
            Err(e) => ResolvedWatermark::Unavailable(e),
        },
    }
}

async fn load_image_watermark(
    source: &str,
    style: &WatermarkStyle,
    fetcher: &dyn Fetcher,
) -> Result<RgbaImage, WatermarkError> {
    let image = fetch_image(fetcher, source)
        .await
        .map_err(|e| WatermarkError::FetchError(e.to_string()))?;

    limit_width(&image, style.max_width).map_err(|e| WatermarkError::DecodeError(e.to_string()))
}

/// Stamp `watermark` onto `canvas` at the bottom-right anchor.
///
/// Watermarks larger than the canvas are clipped rather than rejected.
/// Returns the top-left corner used for the paste.
pub fn apply_watermark(
    canvas: &mut RgbaImage,
    watermark: &Watermark,
    style: &WatermarkStyle,
) -> Result<PlacementPosition, WatermarkError> {
    let rendered;
    let mark = match watermark {
        Watermark::Image(image) => image,
        Watermark::Text { text, font } => {
            let options = TextRenderOptions {
                text: text.clone(),
                font_size: style.font_size,
                color: [0, 0, 0],
                alpha: style.text_alpha,
            };
            rendered = render_text(font, &options)?;
            &rendered
        }
    };

    let image_dims = ImageDimensions {
        width: canvas.width(),
        height: canvas.height(),
    };
    let wm_dims = WatermarkDimensions {
        width: mark.width(),
        height: mark.height(),
    };
    let position = bottom_right(&image_dims, &wm_dims, style.margin_right, style.margin_bottom);

    paste_with_alpha(canvas, mark, position.x, position.y);
    Ok(position)
}
