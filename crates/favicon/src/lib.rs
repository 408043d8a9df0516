//! Favicon derivation for GlassTones.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Source loading with missing-input detection
//! - Centered square cropping
//! - Contrast and sharpness enhancement as an ordered chain
//! - Lanczos resizing to PNG rasters and a multi-resolution ICO

#![warn(missing_docs)]

pub mod config;
mod crop;
mod deriver;
mod detect;
mod encode;
pub mod enhance;
mod error;
mod source;

pub use config::{png_file_name, FaviconConfig, DEFAULT_INPUT, ICO_FILE_NAME, ICO_SIZES, PNG_SIZES};
pub use crop::{crop_to_square, CropRegion};
pub use deriver::{FaviconDeriver, FaviconReport, FileKind, Progress, WrittenFile};
pub use detect::{detect_format, ImageFormat};
pub use encode::{resize_square, write_ico, write_png};
pub use enhance::{Enhancement, EnhancementChain};
pub use error::{FaviconError, ProcessingCause, Result, Stage};
pub use source::{load_source, SourceImage, SourceInfo};
