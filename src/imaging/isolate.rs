//! Background isolation by multi-seed flood fill.
//!
//! Each of the four image corners seeds an independent region-growing pass
//! that uses the corner's own colour as reference, so sources whose corners
//! differ (shadows, gradients, off-white paper) still lose their whole
//! background. All passes share one visited set, bounding the total work to
//! one examination per pixel.

use image::{Rgba, RgbaImage};

use crate::constants::DEFAULT_COLOR_THRESHOLD;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Outcome of one isolation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsolationStats {
    /// Corners that started their own fill (1..=4 for non-empty images)
    pub seeds_filled: u8,
    /// Pixels turned transparent
    pub pixels_cleared: u64,
}

/// Pixels already examined during one isolation run.
struct VisitedSet {
    width: u32,
    bits: Vec<bool>,
}

impl VisitedSet {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            bits: vec![false; width as usize * height as usize],
        }
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    /// Returns false if the pixel was already present.
    fn insert(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        !std::mem::replace(&mut self.bits[idx], true)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Reference colour captured at a fill's starting pixel.
#[derive(Debug, Clone, Copy)]
enum SeedColor {
    Opaque([u8; 3]),
    /// The corner is already transparent: grow through transparent pixels only.
    Cleared,
}

impl SeedColor {
    fn of(pixel: &Rgba<u8>) -> Self {
        if pixel[3] == 0 {
            SeedColor::Cleared
        } else {
            SeedColor::Opaque([pixel[0], pixel[1], pixel[2]])
        }
    }

    fn accepts(&self, pixel: &Rgba<u8>, threshold: u8) -> bool {
        match self {
            SeedColor::Cleared => pixel[3] == 0,
            SeedColor::Opaque(seed) => seed
                .iter()
                .zip(pixel.0.iter())
                .all(|(s, p)| s.abs_diff(*p) < threshold),
        }
    }
}

/// Return a copy of `source` with every corner-connected background region
/// made transparent, using the default per-channel threshold.
pub fn isolate_background(source: &RgbaImage) -> RgbaImage {
    isolate_with_threshold(source, DEFAULT_COLOR_THRESHOLD)
}

/// Like [`isolate_background`] with an explicit per-channel threshold.
pub fn isolate_with_threshold(source: &RgbaImage, threshold: u8) -> RgbaImage {
    let mut isolated = source.clone();
    isolate_background_in_place(&mut isolated, threshold);
    isolated
}

/// Flood-fill from the four corners of `image`, clearing accepted pixels.
///
/// A pixel joins a corner's region when each RGB channel differs from that
/// corner's colour by less than `threshold`. Corners swallowed by an earlier
/// corner's fill do not seed again.
pub fn isolate_background_in_place(image: &mut RgbaImage, threshold: u8) -> IsolationStats {
    let (width, height) = image.dimensions();
    let mut stats = IsolationStats::default();
    if width == 0 || height == 0 {
        return stats;
    }

    let corners = [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ];

    let mut visited = VisitedSet::new(width, height);
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for (start_x, start_y) in corners {
        if visited.contains(start_x, start_y) {
            continue;
        }

        let seed = SeedColor::of(image.get_pixel(start_x, start_y));
        stats.seeds_filled += 1;
        stack.push((start_x, start_y));

        while let Some((x, y)) = stack.pop() {
            if !visited.insert(x, y) {
                continue;
            }

            let pixel = image.get_pixel(x, y);
            if !seed.accepts(pixel, threshold) {
                continue;
            }

            image.put_pixel(x, y, TRANSPARENT);
            stats.pixels_cleared += 1;

            if x + 1 < width {
                stack.push((x + 1, y));
            }
            if x > 0 {
                stack.push((x - 1, y));
            }
            if y + 1 < height {
                stack.push((x, y + 1));
            }
            if y > 0 {
                stack.push((x, y - 1));
            }
        }
    }

    tracing::trace!(
        seeds = stats.seeds_filled,
        cleared = stats.pixels_cleared,
        width,
        height,
        "Background isolated"
    );

    stats
}
