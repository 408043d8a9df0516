//! Error types for favicon derivation.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for favicon operations.
pub type Result<T> = std::result::Result<T, FaviconError>;

/// Pipeline step in which a processing failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Reading and decoding the source file
    Decode,
    /// Cropping to the centered square
    Crop,
    /// Applying the enhancement chain
    Enhance,
    /// Resampling to an output size
    Resize,
    /// Encoding and writing an output file
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Crop => "crop",
            Stage::Enhance => "enhance",
            Stage::Resize => "resize",
            Stage::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Underlying cause of a processing failure.
#[derive(Debug, Error)]
pub enum ProcessingCause {
    /// Unknown image format
    #[error("Unknown image format")]
    UnknownFormat,

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the imaging backend
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors reported by the favicon pipeline.
#[derive(Debug, Error)]
pub enum FaviconError {
    /// The source path does not resolve to a readable file. Nothing was written.
    #[error("Input image not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A step failed after the input was found. Files written before the
    /// failure are left in place.
    #[error("Failed to {stage}: {source}")]
    ProcessingFailure {
        /// Step that failed
        stage: Stage,
        /// Underlying cause
        #[source]
        source: ProcessingCause,
    },

    /// The supplied configuration cannot produce valid output.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FaviconError {
    /// Build a processing failure for `stage` from anything convertible into a cause.
    pub fn processing(stage: Stage, cause: impl Into<ProcessingCause>) -> Self {
        FaviconError::ProcessingFailure {
            stage,
            source: cause.into(),
        }
    }

    /// Stage of a processing failure, if this is one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            FaviconError::ProcessingFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Check if this error is a missing input.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, FaviconError::MissingInput(_))
    }
}
