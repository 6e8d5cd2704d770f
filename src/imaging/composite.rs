//! Compositing of the trimmed design onto a template.
//!
//! The design is scaled uniformly to fit the template's target region,
//! centred horizontally, offset a fixed distance from the region's top, and
//! alpha-blended onto a copy of the template.
//!
//! # Example
//!
//! ```ignore
//! use mockup_forge::imaging::composite::{composite_onto_template, RegionSpec};
//!
//! let region = RegionSpec::new(100, 120, 800, 1000);
//! let mockup = composite_onto_template(&design, &template, &region)?;
//! assert_eq!(mockup.dimensions(), template.dimensions());
//! ```

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::error::ImageError;
use super::resize::resize_lanczos;
use crate::constants::DEFAULT_REGION_OFFSET_Y;

fn default_offset_y() -> i32 {
    DEFAULT_REGION_OFFSET_Y
}

/// Target rectangle inside a template plus the vertical placement offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    /// Distance from the region's top edge to the pasted design (default: 20)
    #[serde(default = "default_offset_y")]
    pub offset_y: i32,
}

impl RegionSpec {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            offset_y: DEFAULT_REGION_OFFSET_Y,
        }
    }

    pub fn with_offset_y(mut self, offset_y: i32) -> Self {
        self.offset_y = offset_y;
        self
    }
}

/// Where and how large the design lands on the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Uniform scale factor fitting a `fg_w` x `fg_h` design inside the region.
pub fn fit_scale(fg_w: u32, fg_h: u32, target_w: u32, target_h: u32) -> f64 {
    let scale_w = target_w as f64 / fg_w as f64;
    let scale_h = target_h as f64 / fg_h as f64;
    scale_w.min(scale_h)
}

/// Scaled design size for the fit scale, truncated to whole pixels.
///
/// Computed in integer arithmetic so the binding axis lands exactly on the
/// target size instead of one pixel short after float rounding.
pub fn scaled_size(fg_w: u32, fg_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    let (fw, fh) = (fg_w.max(1) as u64, fg_h.max(1) as u64);
    let (tw, th) = (target_w as u64, target_h as u64);

    let (w, h) = if tw * fh <= th * fw {
        (tw, fh * tw / fw)
    } else {
        (fw * th / fh, th)
    };

    ((w as u32).max(1), (h as u32).max(1))
}

/// Compute the placement of a `fg_w` x `fg_h` design inside `region`.
pub fn placement(fg_w: u32, fg_h: u32, region: &RegionSpec) -> Placement {
    let (width, height) = scaled_size(fg_w, fg_h, region.w, region.h);

    Placement {
        x: region.x + (region.w as i32 - width as i32).div_euclid(2),
        y: region.y + region.offset_y,
        width,
        height,
    }
}

/// Scale `design` into `region` and paste it onto a copy of `template`.
///
/// The template itself is never modified; the result always has the
/// template's dimensions.
pub fn composite_onto_template(
    design: &RgbaImage,
    template: &RgbaImage,
    region: &RegionSpec,
) -> Result<RgbaImage, ImageError> {
    if region.w == 0 || region.h == 0 {
        return Err(ImageError::invalid_dimensions(
            region.w,
            region.h,
            "template region must not be empty",
        ));
    }
    if design.width() == 0 || design.height() == 0 {
        return Err(ImageError::invalid_dimensions(
            design.width(),
            design.height(),
            "design must not be empty",
        ));
    }

    let place = placement(design.width(), design.height(), region);
    let resized = resize_lanczos(design, place.width, place.height)?;

    let mut canvas = template.clone();
    paste_with_alpha(&mut canvas, &resized, place.x, place.y);

    tracing::debug!(
        x = place.x,
        y = place.y,
        width = place.width,
        height = place.height,
        "Design composited onto template"
    );

    Ok(canvas)
}

/// Paste `overlay` at (`x`, `y`) using its own alpha as the mask.
///
/// Parts of the overlay outside the canvas are clipped.
pub fn paste_with_alpha(canvas: &mut RgbaImage, overlay: &RgbaImage, x: i32, y: i32) {
    let canvas_w = canvas.width() as i64;
    let canvas_h = canvas.height() as i64;
    let (x, y) = (x as i64, y as i64);

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + overlay.width() as i64).min(canvas_w);
    let y_end = (y + overlay.height() as i64).min(canvas_h);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let src = overlay.get_pixel((tx - x) as u32, (ty - y) as u32);
            if src[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel(tx as u32, ty as u32);
            let blended = blend_over(*dst, *src);
            canvas.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Porter-Duff "over": result = fg + bg * (1 - fg.alpha)
pub(crate) fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    if foreground[3] == 255 {
        return foreground;
    }

    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
