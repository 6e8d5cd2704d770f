//! High-quality resampling with fast_image_resize (Lanczos3).
//!
//! Colour channels are premultiplied by alpha before convolution so fully
//! transparent background pixels left by isolation do not bleed dark fringes
//! into the subject's edges.

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;

use super::error::ImageError;

/// Resize `image` to exactly `target_w` x `target_h`.
pub fn resize_lanczos(
    image: &RgbaImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbaImage, ImageError> {
    if image.dimensions() == (target_w, target_h) {
        return Ok(image.clone());
    }

    let src_width = NonZeroU32::new(image.width())
        .ok_or_else(|| ImageError::resize_failed("Source width is 0"))?;
    let src_height = NonZeroU32::new(image.height())
        .ok_or_else(|| ImageError::resize_failed("Source height is 0"))?;
    let dst_width =
        NonZeroU32::new(target_w).ok_or_else(|| ImageError::resize_failed("Target width is 0"))?;
    let dst_height =
        NonZeroU32::new(target_h).ok_or_else(|| ImageError::resize_failed("Target height is 0"))?;

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| ImageError::resize_failed(format!("Failed to create source image: {:?}", e)))?;

    let alpha_mul_div = MulDiv::default();
    alpha_mul_div
        .multiply_alpha_inplace(&mut src_image.view_mut())
        .map_err(|e| ImageError::resize_failed(format!("Alpha premultiply failed: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let mut dst_view = dst_image.view_mut();

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_view)
        .map_err(|e| ImageError::resize_failed(format!("Resize operation failed: {:?}", e)))?;

    alpha_mul_div
        .divide_alpha_inplace(&mut dst_view)
        .map_err(|e| ImageError::resize_failed(format!("Alpha unpremultiply failed: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImageError::resize_failed("Failed to create output image buffer"))
}

/// Downscale `image` so its width does not exceed `max_width`, keeping the
/// aspect ratio. Narrower images are returned unchanged.
pub fn limit_width(image: &RgbaImage, max_width: u32) -> Result<RgbaImage, ImageError> {
    let (width, height) = image.dimensions();
    if width <= max_width {
        return Ok(image.clone());
    }

    let aspect_ratio = height as f64 / width as f64;
    let new_height = ((max_width as f64 * aspect_ratio) as u32).max(1);
    resize_lanczos(image, max_width, new_height)
}
