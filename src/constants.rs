// Constants module - centralized default values for the mockup pipeline
//
// Every tunable number of the pipeline lives here so the config layer and
// the image stages agree on the same defaults.

// =============================================================================
// Background isolation
// =============================================================================

/// Per-channel distance below which a pixel joins its corner's flood fill
pub const DEFAULT_COLOR_THRESHOLD: u8 = 30;

// =============================================================================
// Trimming
// =============================================================================

/// Maximum horizontal padding kept around the trimmed subject
pub const DEFAULT_MAX_PADDING_X: u32 = 40;

/// Maximum vertical padding kept around the trimmed subject
pub const DEFAULT_MAX_PADDING_Y: u32 = 20;

// =============================================================================
// Compositing
// =============================================================================

/// Vertical offset from the top of the template region to the pasted design
pub const DEFAULT_REGION_OFFSET_Y: i32 = 20;

/// Average RGB value above which a source counts as a white backing
pub const BRIGHTNESS_MIDPOINT: f32 = 128.0;

// =============================================================================
// Watermark defaults
// =============================================================================

/// Image watermarks wider than this are downscaled
pub const DEFAULT_WATERMARK_MAX_WIDTH: u32 = 280;

/// Distance between the watermark and the right edge
pub const DEFAULT_WATERMARK_MARGIN_RIGHT: u32 = 20;

/// Distance between the watermark and the bottom edge
pub const DEFAULT_WATERMARK_MARGIN_BOTTOM: u32 = 50;

/// Text watermark font size in pixels
pub const DEFAULT_WATERMARK_FONT_SIZE: f32 = 100.0;

/// Text watermark alpha (semi-transparent black)
pub const DEFAULT_WATERMARK_TEXT_ALPHA: u8 = 128;

// =============================================================================
// Output defaults
// =============================================================================

/// Default encoder quality (1-100)
pub const DEFAULT_OUTPUT_QUALITY: u8 = 90;

/// Default output directory for generated archives
pub const DEFAULT_OUTPUT_DIR: &str = "generated-zips";

/// Default total output budget in megabytes
pub const DEFAULT_MAX_TOTAL_MB: u64 = 900;

/// File name of the JSON run summary written next to the archives
pub const SUMMARY_FILE_NAME: &str = "generate_summary.json";

// =============================================================================
// Network defaults
// =============================================================================

/// HTTP fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every fetch; some image hosts reject non-browser agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
