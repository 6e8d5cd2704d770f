//! Output configuration: where archives go and how mockups are encoded.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_TOTAL_MB, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_QUALITY};
use crate::imaging::OutputFormat;

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_quality() -> u8 {
    DEFAULT_OUTPUT_QUALITY
}

fn default_max_total_mb() -> u64 {
    DEFAULT_MAX_TOTAL_MB
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the zip archives and the run summary
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Encoding of every mockup (default: webp)
    #[serde(default)]
    pub format: OutputFormat,

    /// Encoder quality, 1-100 (default: 90)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Stop taking new images once this many megabytes were produced (default: 900)
    #[serde(default = "default_max_total_mb")]
    pub max_total_mb: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            format: OutputFormat::default(),
            quality: default_quality(),
            max_total_mb: default_max_total_mb(),
        }
    }
}

impl OutputConfig {
    /// Output budget in bytes.
    pub fn max_total_bytes(&self) -> u64 {
        self.max_total_mb.saturating_mul(1024 * 1024)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.quality) {
            return Err(format!(
                "output.quality must be between 1 and 100, got {}",
                self.quality
            ));
        }
        if self.max_total_mb == 0 {
            return Err("output.max_total_mb must be greater than 0".to_string());
        }
        Ok(())
    }
}
