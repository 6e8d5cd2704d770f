//! Content-aware trimming.
//!
//! Crops away transparent margins left behind by background isolation while
//! keeping a bounded amount of padding around the subject.

use image::RgbaImage;

/// Half-open pixel rectangle `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Grow by `pad_x`/`pad_y` on each side, clamped to a `width` x `height` image.
    pub fn expand(&self, pad_x: u32, pad_y: u32, width: u32, height: u32) -> Self {
        Self {
            x1: self.x1.saturating_sub(pad_x),
            y1: self.y1.saturating_sub(pad_y),
            x2: self.x2.saturating_add(pad_x).min(width),
            y2: self.y2.saturating_add(pad_y).min(height),
        }
    }
}

/// Tight box around every pixel with non-zero alpha, or `None` when the
/// image is fully transparent.
pub fn bounding_box(image: &RgbaImage) -> Option<BoundingBox> {
    let mut found: Option<BoundingBox> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = Some(match found {
            None => BoundingBox::new(x, y, x + 1, y + 1),
            Some(b) => BoundingBox {
                x1: b.x1.min(x),
                y1: b.y1.min(y),
                x2: b.x2.max(x + 1),
                y2: b.y2.max(y + 1),
            },
        });
    }

    found
}

/// Crop `image` to its content box expanded by at most `pad_x`/`pad_y`.
///
/// Returns `None` when there is no content to keep.
pub fn trim_with_padding(image: &RgbaImage, pad_x: u32, pad_y: u32) -> Option<RgbaImage> {
    let (width, height) = image.dimensions();
    let content = bounding_box(image)?;
    let padded = content.expand(pad_x, pad_y, width, height);

    Some(
        image::imageops::crop_imm(
            image,
            padded.x1,
            padded.y1,
            padded.width(),
            padded.height(),
        )
        .to_image(),
    )
}
