// Mockup Forge Library
//
// Image pipeline (isolate, trim, composite, watermark) plus the batch
// generator that feeds it from a crawler's URL lists.

pub mod archive; // Per-template-set zip output
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch; // Source, template and watermark retrieval
pub mod generator;
pub mod imaging;
pub mod logging;
pub mod pipeline;
pub mod watermark;

pub use error::MockupError;
pub use pipeline::render_mockup;
