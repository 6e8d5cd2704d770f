//! Text watermark rendering.
//!
//! Renders a line of text to a transparent RGBA image with ab_glyph, ready
//! to be pasted onto a mockup.
//!
//! # Fonts
//!
//! The configured font file (a bold sans such as Verdana Bold) is tried
//! first. When it is missing or unreadable, a list of common system bold
//! fonts is tried in order. Only when none can be loaded does rendering
//! report [`WatermarkError::FontUnavailable`].
//!
//! # Example
//!
//! ```ignore
//! use mockup_forge::watermark::text_renderer::{load_font, render_text, TextRenderOptions};
//!
//! let font = load_font(Some(Path::new("fonts/verdanab.ttf")))?;
//! let options = TextRenderOptions::new("ACME STORE");
//! let image = render_text(&font, &options)?;
//! ```

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::Path;

use super::WatermarkError;
use crate::constants::{DEFAULT_WATERMARK_FONT_SIZE, DEFAULT_WATERMARK_TEXT_ALPHA};

/// System fonts tried when the configured font cannot be loaded.
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\verdanab.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Load the preferred font, falling back to well-known system fonts.
pub fn load_font(preferred: Option<&Path>) -> Result<FontArc, WatermarkError> {
    if let Some(path) = preferred {
        match load_font_file(path) {
            Ok(font) => return Ok(font),
            Err(e) => {
                tracing::warn!(
                    font = %path.display(),
                    error = %e,
                    "Configured watermark font unavailable, trying system fonts"
                );
            }
        }
    }

    load_first_available(FALLBACK_FONT_PATHS.iter().map(Path::new))
}

/// Load the first font that parses from `candidates`.
pub fn load_first_available<'a, I>(candidates: I) -> Result<FontArc, WatermarkError>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut tried = Vec::new();
    for path in candidates {
        match load_font_file(path) {
            Ok(font) => {
                tracing::debug!(font = %path.display(), "Loaded fallback watermark font");
                return Ok(font);
            }
            Err(_) => tried.push(path.display().to_string()),
        }
    }

    Err(WatermarkError::FontUnavailable(format!(
        "tried {} font(s): {}",
        tried.len(),
        tried.join(", ")
    )))
}

fn load_font_file(path: &Path) -> Result<FontArc, WatermarkError> {
    let data = std::fs::read(path)
        .map_err(|e| WatermarkError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
    FontArc::try_from_vec(data)
        .map_err(|e| WatermarkError::FontUnavailable(format!("{}: {}", path.display(), e)))
}

/// Options for text rendering.
#[derive(Debug, Clone)]
pub struct TextRenderOptions {
    /// The text to render.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Text colour (RGB).
    pub color: [u8; 3],
    /// Maximum alpha of fully covered pixels.
    pub alpha: u8,
}

impl TextRenderOptions {
    /// Semi-transparent black text at the default watermark size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_WATERMARK_FONT_SIZE,
            color: [0, 0, 0],
            alpha: DEFAULT_WATERMARK_TEXT_ALPHA,
        }
    }
}

/// Calculate the dimensions of rendered text.
///
/// Returns (width, height) in pixels.
pub fn measure_text(font: &FontArc, text: &str, font_size: f32) -> (u32, u32) {
    let scaled_font = font.as_scaled(PxScale::from(font_size));

    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    let height = scaled_font.height();

    // Small padding so anti-aliased edges are not cut off
    let padding = 2;
    (
        width.ceil().max(0.0) as u32 + padding,
        height.ceil().max(0.0) as u32 + padding,
    )
}

/// Render text to a transparent RGBA image sized to the text.
pub fn render_text(
    font: &FontArc,
    options: &TextRenderOptions,
) -> Result<RgbaImage, WatermarkError> {
    if options.text.is_empty() {
        return Err(WatermarkError::RenderError(
            "Cannot render empty text".to_string(),
        ));
    }

    let scale = PxScale::from(options.font_size);
    let scaled_font = font.as_scaled(scale);

    let (width, height) = measure_text(font, &options.text, options.font_size);
    let (canvas_width, canvas_height) = (width.max(1), height.max(1));
    let mut image = RgbaImage::new(canvas_width, canvas_height);

    let baseline_y = scaled_font.ascent();
    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in options.text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < canvas_width as i32 && y < canvas_height as i32 {
                    let pixel_alpha = (coverage.clamp(0.0, 1.0) * options.alpha as f32) as u8;
                    let existing = image.get_pixel_mut(x as u32, y as u32);
                    // Overlapping glyph edges keep the stronger coverage
                    if pixel_alpha > existing[3] {
                        *existing = Rgba([
                            options.color[0],
                            options.color[1],
                            options.color[2],
                            pixel_alpha,
                        ]);
                    }
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Ok(image)
}
