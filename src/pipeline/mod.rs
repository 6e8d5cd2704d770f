// Mockup pipeline - turns one source image into finished mockups
//
// A source is prepared once (decode, classify, crop, isolate, trim) and then
// rendered once per template set (composite, watermark, encode).

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{CropRect, DomainRule};
use crate::constants::{
    BRIGHTNESS_MIDPOINT, DEFAULT_COLOR_THRESHOLD, DEFAULT_MAX_PADDING_X, DEFAULT_MAX_PADDING_Y,
    DEFAULT_OUTPUT_QUALITY,
};
use crate::error::MockupError;
use crate::imaging::{
    composite_onto_template, decode, encode, isolate_background_in_place, trim_with_padding,
    IsolationStats, OutputFormat, RegionSpec,
};
use crate::watermark::{apply_watermark, ResolvedWatermark, WatermarkStyle};

/// Shirt colour a source was photographed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backing {
    White,
    Black,
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backing::White => write!(f, "white"),
            Backing::Black => write!(f, "black"),
        }
    }
}

/// Classify the source by the pixel at `(x, y)`: white when the mean of its
/// RGB channels exceeds 128.
pub fn classify_backing(source: &RgbaImage, x: i32, y: i32) -> Result<Backing, MockupError> {
    let (width, height) = source.dimensions();
    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
        return Err(MockupError::SamplePointOutOfBounds {
            x,
            y,
            width,
            height,
        });
    }

    let pixel = source.get_pixel(x as u32, y as u32);
    let brightness = (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0;
    if brightness > BRIGHTNESS_MIDPOINT {
        Ok(Backing::White)
    } else {
        Ok(Backing::Black)
    }
}

/// Cut `rect` out of `source`.
///
/// The result always has the rectangle's size; parts of the rectangle lying
/// outside the source are transparent.
pub fn crop_to_rect(source: &RgbaImage, rect: &CropRect) -> RgbaImage {
    let mut cropped = RgbaImage::from_pixel(rect.w, rect.h, Rgba([0, 0, 0, 0]));
    let (src_w, src_h) = (source.width() as i64, source.height() as i64);

    let x_start = (rect.x as i64).max(0);
    let y_start = (rect.y as i64).max(0);
    let x_end = (rect.x as i64 + rect.w as i64).min(src_w);
    let y_end = (rect.y as i64 + rect.h as i64).min(src_h);

    for sy in y_start..y_end {
        for sx in x_start..x_end {
            let dx = (sx - rect.x as i64) as u32;
            let dy = (sy - rect.y as i64) as u32;
            cropped.put_pixel(dx, dy, *source.get_pixel(sx as u32, sy as u32));
        }
    }
    cropped
}

/// The parts of a domain rule the image pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRule {
    pub crop: CropRect,
    pub skip_white: bool,
    pub skip_black: bool,
}

impl RenderRule {
    pub fn new(crop: CropRect) -> Self {
        Self {
            crop,
            skip_white: false,
            skip_black: false,
        }
    }

    /// `None` when the rule has no crop rectangle.
    pub fn from_domain_rule(rule: &DomainRule) -> Option<Self> {
        rule.coords.map(|crop| Self {
            crop,
            skip_white: rule.skip_white,
            skip_black: rule.skip_black,
        })
    }

    fn rejects(&self, backing: Backing) -> bool {
        match backing {
            Backing::White => self.skip_white,
            Backing::Black => self.skip_black,
        }
    }
}

/// Tunables of the image stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub quality: u8,
    pub color_threshold: u8,
    pub pad_x: u32,
    pub pad_y: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quality: DEFAULT_OUTPUT_QUALITY,
            color_threshold: DEFAULT_COLOR_THRESHOLD,
            pad_x: DEFAULT_MAX_PADDING_X,
            pad_y: DEFAULT_MAX_PADDING_Y,
        }
    }
}

/// A source after isolation and trimming, ready to be composited.
#[derive(Debug, Clone)]
pub struct PreparedSource {
    pub backing: Backing,
    pub design: RgbaImage,
    pub isolation: IsolationStats,
}

/// Template set with its images and watermark loaded.
#[derive(Debug, Clone)]
pub struct LoadedTemplateSet {
    pub name: String,
    pub white: Option<RgbaImage>,
    pub black: Option<RgbaImage>,
    pub region: RegionSpec,
    pub watermark: ResolvedWatermark,
    pub watermark_style: WatermarkStyle,
}

impl LoadedTemplateSet {
    pub fn new(name: impl Into<String>, region: RegionSpec) -> Self {
        Self {
            name: name.into(),
            white: None,
            black: None,
            region,
            watermark: ResolvedWatermark::Absent,
            watermark_style: WatermarkStyle::default(),
        }
    }

    pub fn template_for(&self, backing: Backing) -> Option<&RgbaImage> {
        match backing {
            Backing::White => self.white.as_ref(),
            Backing::Black => self.black.as_ref(),
        }
    }
}

/// One encoded mockup.
#[derive(Debug, Clone)]
pub struct RenderedMockup {
    pub template_set: String,
    pub backing: Backing,
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub watermarked: bool,
    pub bytes: Vec<u8>,
}

/// Decode, classify, crop, isolate and trim a source image.
pub fn prepare_source(
    source_bytes: &[u8],
    rule: &RenderRule,
    options: &RenderOptions,
) -> Result<PreparedSource, MockupError> {
    let source =
        decode(source_bytes).map_err(|e| MockupError::RetrievalFailure(e.to_string()))?;

    let backing = classify_backing(&source, rule.crop.x, rule.crop.y)?;
    if rule.rejects(backing) {
        return Err(MockupError::BackingFiltered(backing));
    }

    let mut design = crop_to_rect(&source, &rule.crop);
    let isolation = isolate_background_in_place(&mut design, options.color_threshold);
    let design =
        trim_with_padding(&design, options.pad_x, options.pad_y).ok_or(MockupError::EmptyContent)?;

    tracing::debug!(
        backing = %backing,
        seeds = isolation.seeds_filled,
        cleared = isolation.pixels_cleared,
        width = design.width(),
        height = design.height(),
        "Prepared source"
    );

    Ok(PreparedSource {
        backing,
        design,
        isolation,
    })
}

/// Composite a prepared source onto one template set, watermark and encode.
pub fn render_variant(
    prepared: &PreparedSource,
    set: &LoadedTemplateSet,
    options: &RenderOptions,
) -> Result<RenderedMockup, MockupError> {
    let template = set.template_for(prepared.backing).ok_or_else(|| {
        MockupError::MissingAsset(format!(
            "template set '{}' has no {} template",
            set.name, prepared.backing
        ))
    })?;

    if let ResolvedWatermark::Unavailable(e) = &set.watermark {
        return Err(MockupError::MissingAsset(format!(
            "template set '{}': {}",
            set.name, e
        )));
    }

    let mut mockup = composite_onto_template(&prepared.design, template, &set.region).map_err(
        |e| MockupError::MissingAsset(format!("template set '{}' is unusable: {}", set.name, e)),
    )?;

    let mut watermarked = false;
    if let ResolvedWatermark::Ready(watermark) = &set.watermark {
        match apply_watermark(&mut mockup, watermark, &set.watermark_style) {
            Ok(_) => watermarked = true,
            Err(e) => tracing::warn!(
                template_set = %set.name,
                error = %e,
                "Watermark could not be applied"
            ),
        }
    }

    let bytes = encode(&mockup, options.format, options.quality)
        .map_err(|e| MockupError::EncodeFailed(e.to_string()))?;

    Ok(RenderedMockup {
        template_set: set.name.clone(),
        backing: prepared.backing,
        width: mockup.width(),
        height: mockup.height(),
        format: options.format,
        watermarked,
        bytes,
    })
}

/// Full pipeline for one source and one template set.
pub fn render_mockup(
    source_bytes: &[u8],
    set: &LoadedTemplateSet,
    rule: &RenderRule,
    options: &RenderOptions,
) -> Result<RenderedMockup, MockupError> {
    let prepared = prepare_source(source_bytes, rule, options)?;
    render_variant(&prepared, set, options)
}
