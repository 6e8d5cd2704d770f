//! Image-processing stages of the mockup pipeline.
//!
//! - [`isolate`]: four-corner flood fill that clears the background
//! - [`trim`]: bounding box and padded crop
//! - [`resize`]: Lanczos3 resampling
//! - [`composite`]: fit, place and alpha-paste onto a template
//! - [`codec`]: decode input bytes, encode finished mockups

pub mod codec;
pub mod composite;
pub mod error;
pub mod isolate;
pub mod resize;
pub mod trim;

pub use codec::{decode, encode, EncoderFactory, ImageEncoder, OutputFormat};
pub use composite::{
    composite_onto_template, fit_scale, paste_with_alpha, placement, scaled_size, Placement,
    RegionSpec,
};
pub use error::ImageError;
pub use isolate::{
    isolate_background, isolate_background_in_place, isolate_with_threshold, IsolationStats,
};
pub use resize::{limit_width, resize_lanczos};
pub use trim::{bounding_box, trim_with_padding, BoundingBox};
