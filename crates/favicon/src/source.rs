//! Source image loading.

use crate::{detect_format, FaviconError, ImageFormat, ProcessingCause, Result, Stage};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Facts about the decoded source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Encoded file size in bytes
    pub size_bytes: usize,
}

/// A decoded source image.
pub struct SourceImage {
    /// Decoded pixels
    pub image: DynamicImage,
    /// Dimensions and format
    pub info: SourceInfo,
}

/// Read and decode the image at `path`.
///
/// Returns [`FaviconError::MissingInput`] when `path` is not an existing file,
/// before touching anything else.
pub fn load_source(path: &Path) -> Result<SourceImage> {
    if !path.is_file() {
        return Err(FaviconError::MissingInput(path.to_path_buf()));
    }

    let data = std::fs::read(path).map_err(|e| FaviconError::processing(Stage::Decode, e))?;
    let format = detect_format(&data).map_err(|e| FaviconError::processing(Stage::Decode, e))?;
    let image = image::load_from_memory_with_format(&data, format.to_backend())
        .map_err(|e| FaviconError::processing(Stage::Decode, e))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(FaviconError::processing(
            Stage::Decode,
            ProcessingCause::InvalidData("image has zero area".into()),
        ));
    }

    let info = SourceInfo {
        width: image.width(),
        height: image.height(),
        format,
        size_bytes: data.len(),
    };

    Ok(SourceImage { image, info })
}
