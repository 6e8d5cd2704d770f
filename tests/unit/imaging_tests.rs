// Image stage unit tests: isolation, trimming and compositing working together

use image::{Rgba, RgbaImage};
use mockup_forge::imaging::*;
use rstest::rstest;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);
const TEMPLATE: Rgba<u8> = Rgba([90, 90, 90, 255]);

/// 500x500 white canvas with a red 200x300 box at (150, 100).
fn framed_design() -> RgbaImage {
    let mut image = RgbaImage::from_pixel(500, 500, WHITE);
    for y in 100..400 {
        for x in 150..350 {
            image.put_pixel(x, y, RED);
        }
    }
    image
}

#[test]
fn test_isolate_then_trim_keeps_bounded_padding() {
    let isolated = isolate_background(&framed_design());
    let bbox = bounding_box(&isolated).unwrap();
    assert_eq!(bbox, BoundingBox::new(150, 100, 350, 400));

    let trimmed = trim_with_padding(&isolated, 40, 20).unwrap();
    assert_eq!(trimmed.dimensions(), (280, 340));
}

#[test]
fn test_uniform_image_has_no_content() {
    let isolated = isolate_background(&RgbaImage::from_pixel(64, 64, Rgba([10, 200, 10, 255])));
    assert!(bounding_box(&isolated).is_none());
    assert!(trim_with_padding(&isolated, 40, 20).is_none());
}

#[test]
fn test_isolation_is_idempotent_on_real_design() {
    let once = isolate_background(&framed_design());
    let twice = isolate_background(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_design_fitted_into_large_region() {
    let design = trim_with_padding(&isolate_background(&framed_design()), 40, 20).unwrap();
    let template = RgbaImage::from_pixel(1000, 1200, TEMPLATE);
    let region = RegionSpec::new(100, 50, 800, 1000);

    // min(800 / 280, 1000 / 340): width binds
    assert_eq!(scaled_size(280, 340, 800, 1000), (800, 971));
    let place = placement(280, 340, &region);
    assert_eq!((place.x, place.y), (100, 70));

    let mockup = composite_onto_template(&design, &template, &region).unwrap();
    assert_eq!(mockup.dimensions(), template.dimensions());

    // Middle of the red box
    let centre = mockup.get_pixel(500, 500);
    assert!(centre[0] > 180 && centre[1] < 60, "got {:?}", centre);
    // Transparent padding leaves the template visible
    assert_eq!(*mockup.get_pixel(150, 500), TEMPLATE);
    // Above the offset nothing was pasted
    assert_eq!(*mockup.get_pixel(500, 60), TEMPLATE);
}

#[rstest]
#[case(280, 340, 800, 1000)]
#[case(1000, 10, 300, 300)]
#[case(10, 1000, 300, 300)]
#[case(333, 777, 101, 59)]
#[case(1, 1, 800, 1000)]
fn test_scaled_size_stays_inside_region(
    #[case] fg_w: u32,
    #[case] fg_h: u32,
    #[case] target_w: u32,
    #[case] target_h: u32,
) {
    let (w, h) = scaled_size(fg_w, fg_h, target_w, target_h);
    assert!(w >= 1 && h >= 1);
    assert!(w <= target_w && h <= target_h);
    assert!(w == target_w || h == target_h);
}

#[test]
fn test_composite_never_mutates_template() {
    let design = RgbaImage::from_pixel(10, 10, RED);
    let template = RgbaImage::from_pixel(50, 50, TEMPLATE);
    let before = template.clone();
    let _ = composite_onto_template(&design, &template, &RegionSpec::new(0, 0, 50, 50)).unwrap();
    assert_eq!(template, before);
}

#[test]
fn test_encode_decode_keeps_dimensions() {
    let mockup = RgbaImage::from_pixel(37, 21, TEMPLATE);
    for format in [OutputFormat::WebP, OutputFormat::Png, OutputFormat::Jpeg] {
        let bytes = encode(&mockup, format, 90).unwrap();
        assert_eq!(decode(&bytes).unwrap().dimensions(), (37, 21), "{:?}", format);
    }
}
