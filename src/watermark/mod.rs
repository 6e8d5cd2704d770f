//! Watermarks stamped onto finished mockups.
//!
//! Each template set may configure one watermark through its
//! `watermark_text` value:
//!
//! - **Image watermarks**: an `http(s)://` URL, fetched once per run and
//!   downscaled to at most 280 px wide
//! - **Text watermarks**: any other string, rendered at 100 px in a bold
//!   sans font as semi-transparent black
//!
//! Both kinds are anchored to the bottom-right corner, 20 px from the right
//! edge and 50 px from the bottom edge.
//!
//! ```yaml
//! template_sets:
//!   classic:
//!     watermark_text: "ACME STORE"
//!   branded:
//!     watermark_text: "https://cdn.example.com/logo.png"
//! ```

pub mod applier;
pub mod config;
pub mod error;
pub mod position;
pub mod text_renderer;

// Re-export main types for convenience
pub use applier::{apply_watermark, resolve_watermark, ResolvedWatermark, Watermark};
pub use config::{deserialize_watermark_spec, WatermarkSpec, WatermarkStyle};
pub use error::WatermarkError;
pub use position::{bottom_right, ImageDimensions, PlacementPosition, WatermarkDimensions};
pub use text_renderer::{load_font, measure_text, render_text, TextRenderOptions};
