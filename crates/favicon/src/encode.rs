//! Resizing and output encoding.

use crate::{FaviconError, Result, Stage};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Resample `image` to exactly `size` x `size` with Lanczos3.
pub fn resize_square(image: &DynamicImage, size: u32) -> DynamicImage {
    image.resize_exact(size, size, FilterType::Lanczos3)
}

/// Encode a PNG with maximum compression and the adaptive row filter.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive)
        .write_image(image.as_bytes(), image.width(), image.height(), image.color())
        .map_err(|e| FaviconError::processing(Stage::Encode, e))?;
    Ok(buffer)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| FaviconError::processing(Stage::Encode, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| FaviconError::processing(Stage::Encode, e))
}

/// Write `image` as an optimized PNG at `path`, returning the bytes written.
pub fn write_png(image: &DynamicImage, path: &Path) -> Result<u64> {
    let bytes = encode_png(image)?;
    write_file(path, &bytes)?;
    Ok(bytes.len() as u64)
}

/// Write every frame into one ICO container at `path`, returning the bytes written.
///
/// Frames are stored as PNG entries; the directory records each frame's
/// dimensions.
pub fn write_ico(frames: &[DynamicImage], path: &Path) -> Result<u64> {
    let entries = frames
        .iter()
        .map(|frame| {
            let rgba = frame.to_rgba8();
            IcoFrame::as_png(rgba.as_raw(), rgba.width(), rgba.height(), ColorType::Rgba8)
        })
        .collect::<image::ImageResult<Vec<_>>>()
        .map_err(|e| FaviconError::processing(Stage::Encode, e))?;

    let mut buffer = Vec::new();
    IcoEncoder::new(&mut buffer)
        .encode_images(&entries)
        .map_err(|e| FaviconError::processing(Stage::Encode, e))?;

    write_file(path, &buffer)?;
    Ok(buffer.len() as u64)
}
