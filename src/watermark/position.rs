//! Position calculation for watermark placement.
//!
//! Watermarks are anchored to the bottom-right corner with independent
//! right and bottom margins. Coordinates may be negative when the watermark
//! is larger than the image; the paste clips whatever falls outside.
//!
//! ```ignore
//! use mockup_forge::watermark::position::{bottom_right, ImageDimensions, WatermarkDimensions};
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let watermark = WatermarkDimensions { width: 100, height: 50 };
//!
//! let pos = bottom_right(&image, &watermark, 20, 50);
//! assert_eq!((pos.x, pos.y), (680, 500)); // 800 - 100 - 20, 600 - 50 - 50
//! ```

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the watermark to be placed.
#[derive(Debug, Clone, Copy)]
pub struct WatermarkDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner where a watermark should be pasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Anchor a watermark to the bottom-right corner.
pub fn bottom_right(
    image: &ImageDimensions,
    watermark: &WatermarkDimensions,
    margin_right: u32,
    margin_bottom: u32,
) -> PlacementPosition {
    PlacementPosition::new(
        image.width as i32 - watermark.width as i32 - margin_right as i32,
        image.height as i32 - watermark.height as i32 - margin_bottom as i32,
    )
}
