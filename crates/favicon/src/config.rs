//! Pipeline configuration.
//!
//! The defaults are the fixed GlassTones favicon set. Everything the pipeline
//! needs is passed in through [`FaviconConfig`] so it can run against any
//! input and size list.

use crate::enhance::Enhancement;
use crate::{FaviconError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default source image, relative to the working directory.
pub const DEFAULT_INPUT: &str = "assets/rust_bg.jpg";

/// Sizes written as standalone PNG files.
pub const PNG_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Sizes embedded in the ICO container.
pub const ICO_SIZES: [u32; 3] = [16, 32, 48];

/// File name of the ICO container.
pub const ICO_FILE_NAME: &str = "favicon.ico";

/// The ICO directory stores each dimension in a single byte (0 meaning 256).
const MAX_ICO_SIZE: u32 = 256;

/// File name for the standalone PNG at `size`.
///
/// # Example
/// ```
/// assert_eq!(glasstones_favicon::png_file_name(32), "favicon_32x32.png");
/// ```
pub fn png_file_name(size: u32) -> String {
    format!("favicon_{size}x{size}.png")
}

/// Configuration for one favicon derivation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaviconConfig {
    /// Source image path
    pub input: PathBuf,
    /// Directory receiving every output file
    pub output_dir: PathBuf,
    /// Standalone PNG sizes, written in order
    pub png_sizes: Vec<u32>,
    /// Sizes bundled into the ICO container
    pub ico_sizes: Vec<u32>,
    /// Enhancements applied once to the cropped square, left to right
    pub enhancements: Vec<Enhancement>,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            png_sizes: PNG_SIZES.to_vec(),
            ico_sizes: ICO_SIZES.to_vec(),
            enhancements: vec![Enhancement::Contrast(1.3), Enhancement::Sharpness(1.2)],
        }
    }
}

impl FaviconConfig {
    /// Default configuration reading from `input` and writing into `output_dir`.
    pub fn with_paths(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Number of files a successful run writes.
    pub fn total_files(&self) -> usize {
        self.png_sizes.len() + 1
    }

    /// Check that this configuration can produce valid output.
    pub fn validate(&self) -> Result<()> {
        if self.png_sizes.is_empty() {
            return Err(FaviconError::InvalidConfig("png_sizes is empty".into()));
        }
        if self.ico_sizes.is_empty() {
            return Err(FaviconError::InvalidConfig("ico_sizes is empty".into()));
        }
        if self.png_sizes.iter().chain(&self.ico_sizes).any(|&s| s == 0) {
            return Err(FaviconError::InvalidConfig("sizes must be non-zero".into()));
        }
        if let Some(size) = self.ico_sizes.iter().find(|&&s| s > MAX_ICO_SIZE) {
            return Err(FaviconError::InvalidConfig(format!(
                "ICO size {size} exceeds {MAX_ICO_SIZE}"
            )));
        }
        for enhancement in &self.enhancements {
            let factor = enhancement.factor();
            if !factor.is_finite() || factor < 0.0 {
                return Err(FaviconError::InvalidConfig(format!(
                    "{} factor must be a finite non-negative number, got {factor}",
                    enhancement.name()
                )));
            }
        }
        Ok(())
    }
}
