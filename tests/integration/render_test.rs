// Single-image rendering through the public entry point

use super::harness::*;
use image::RgbaImage;
use mockup_forge::config::CropRect;
use mockup_forge::fetch::MemoryFetcher;
use mockup_forge::imaging::{decode, OutputFormat, RegionSpec};
use mockup_forge::pipeline::{Backing, LoadedTemplateSet, RenderOptions, RenderRule};
use mockup_forge::watermark::{resolve_watermark, WatermarkSpec, WatermarkStyle};
use mockup_forge::{render_mockup, MockupError};

fn loaded_set() -> LoadedTemplateSet {
    let mut set = LoadedTemplateSet::new("classic", RegionSpec::new(10, 10, 80, 80));
    set.white = Some(RgbaImage::from_pixel(200, 150, WHITE_TEMPLATE));
    set.black = Some(RgbaImage::from_pixel(200, 150, BLACK_TEMPLATE));
    set
}

fn png_options() -> RenderOptions {
    RenderOptions {
        format: OutputFormat::Png,
        ..RenderOptions::default()
    }
}

#[tokio::test]
async fn test_render_with_resolved_image_watermark() {
    let fetcher = MemoryFetcher::new();
    fetcher.insert(LOGO_URL, png(&RgbaImage::from_pixel(10, 10, BLUE)));

    let mut set = loaded_set();
    let spec = WatermarkSpec::parse(LOGO_URL);
    set.watermark =
        resolve_watermark(spec.as_ref(), &WatermarkStyle::default(), &fetcher, None).await;

    let rule = RenderRule::new(CropRect::new(0, 0, 100, 100));
    let mockup = render_mockup(&png(&product_photo(WHITE)), &set, &rule, &png_options()).unwrap();

    assert_eq!(mockup.backing, Backing::White);
    assert!(mockup.watermarked);
    let image = decode(&mockup.bytes).unwrap();
    assert_eq!(*image.get_pixel(175, 95), BLUE);
}

#[tokio::test]
async fn test_render_with_long_text_watermark() {
    let fetcher = MemoryFetcher::new();
    let spec = WatermarkSpec::parse("ACME STORE WITH A VERY LONG NAME");
    let font = fixture_font_path();
    let resolved = resolve_watermark(
        spec.as_ref(),
        &WatermarkStyle::default(),
        &fetcher,
        Some(font.as_path()),
    )
    .await;
    assert!(resolved.is_ready());

    let mut set = loaded_set();
    set.watermark = resolved;
    let rule = RenderRule::new(CropRect::new(0, 0, 100, 100));
    let mockup = render_mockup(&png(&product_photo(WHITE)), &set, &rule, &png_options()).unwrap();

    // Text far wider than the canvas is clipped, never an error
    assert!(mockup.watermarked);
    assert_eq!((mockup.width, mockup.height), (200, 150));
}

#[test]
fn test_crop_hanging_off_the_source() {
    // Crop extends past the right and bottom edges; the overhang is
    // transparent and trims away.
    let rule = RenderRule::new(CropRect::new(20, 30, 200, 200));
    let mockup =
        render_mockup(&png(&product_photo(WHITE)), &loaded_set(), &rule, &png_options()).unwrap();
    assert_eq!((mockup.width, mockup.height), (200, 150));
}

#[test]
fn test_sample_point_outside_source() {
    let rule = RenderRule::new(CropRect::new(150, 0, 50, 50));
    let err = render_mockup(&png(&product_photo(WHITE)), &loaded_set(), &rule, &png_options())
        .unwrap_err();
    assert!(matches!(err, MockupError::SamplePointOutOfBounds { x: 150, .. }));
}

#[test]
fn test_webp_output_by_default() {
    let rule = RenderRule::new(CropRect::new(0, 0, 100, 100));
    let mockup = render_mockup(
        &png(&product_photo(BLACK)),
        &loaded_set(),
        &rule,
        &RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(mockup.format, OutputFormat::WebP);
    assert_eq!(&mockup.bytes[0..4], b"RIFF");
    assert_eq!(decode(&mockup.bytes).unwrap().dimensions(), (200, 150));
}
