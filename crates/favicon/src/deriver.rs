//! The favicon pipeline: load, crop, enhance once, then write every size.

use crate::config::{png_file_name, FaviconConfig, ICO_FILE_NAME};
use crate::{
    crop_to_square, load_source, resize_square, write_ico, write_png, CropRegion,
    EnhancementChain, FaviconError, Result, SourceInfo, Stage,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Kind of file a run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Standalone PNG raster
    Png,
    /// Multi-resolution ICO container
    Ico,
}

/// A file flushed to disk by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Output kind
    pub kind: FileKind,
    /// Path the file was written to
    pub path: PathBuf,
    /// Square sizes held by the file (one for PNG, several for ICO)
    pub sizes: Vec<u32>,
    /// Encoded size in bytes
    pub bytes: u64,
}

impl WrittenFile {
    /// File name without the output directory.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Event reported while a run is in progress.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Source decoded and the crop region chosen
    Loaded {
        /// Decoded source facts
        source: &'a SourceInfo,
        /// Square region taken from the source
        crop: CropRegion,
    },
    /// A file was flushed to disk
    Written(&'a WrittenFile),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct FaviconReport {
    /// Decoded source facts
    pub source: SourceInfo,
    /// Square region taken from the source
    pub crop: CropRegion,
    /// PNG files in size order, then the ICO
    pub files: Vec<WrittenFile>,
    /// Wall time of the run
    pub elapsed_ms: u64,
}

impl FaviconReport {
    /// Standalone PNG outputs.
    pub fn pngs(&self) -> impl Iterator<Item = &WrittenFile> {
        self.files.iter().filter(|f| f.kind == FileKind::Png)
    }

    /// The ICO output.
    pub fn ico(&self) -> Option<&WrittenFile> {
        self.files.iter().find(|f| f.kind == FileKind::Ico)
    }

    /// Total bytes written across all outputs.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// Derives the favicon set described by a [`FaviconConfig`].
#[derive(Debug, Clone)]
pub struct FaviconDeriver {
    config: FaviconConfig,
    chain: EnhancementChain,
}

impl FaviconDeriver {
    /// Create a deriver, rejecting configs that cannot produce valid output.
    pub fn new(config: FaviconConfig) -> Result<Self> {
        config.validate()?;
        let chain = EnhancementChain::new(config.enhancements.clone());
        Ok(Self { config, chain })
    }

    /// Configuration this deriver runs with.
    pub fn config(&self) -> &FaviconConfig {
        &self.config
    }

    /// Number of files a successful run writes.
    pub fn total_files(&self) -> usize {
        self.config.total_files()
    }

    /// Run the pipeline.
    pub fn derive(&self) -> Result<FaviconReport> {
        self.derive_with_progress(|_| {})
    }

    /// Run the pipeline, reporting each step to `on_progress`.
    ///
    /// A missing input returns before anything is written. Any later failure
    /// stops the run; files already written stay on disk.
    pub fn derive_with_progress<F>(&self, mut on_progress: F) -> Result<FaviconReport>
    where
        F: FnMut(Progress<'_>),
    {
        let started = Instant::now();
        let source = load_source(&self.config.input)?;
        tracing::info!(
            path = %self.config.input.display(),
            width = source.info.width,
            height = source.info.height,
            format = ?source.info.format,
            "Loaded source image"
        );

        let (square, crop) = crop_to_square(&source.image);
        // load_source rejects zero-area images
        debug_assert!(crop.size > 0);
        tracing::info!(crop = ?crop.as_box(), "Cropped to centered square");
        on_progress(Progress::Loaded { source: &source.info, crop });
        drop(source.image);

        let enhanced = self.chain.apply(&square);
        drop(square);

        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| FaviconError::processing(Stage::Encode, e))?;

        let mut files = Vec::with_capacity(self.total_files());

        for &size in &self.config.png_sizes {
            let path = self.config.output_dir.join(png_file_name(size));
            let resized = resize_square(&enhanced, size);
            let bytes = write_png(&resized, &path)?;
            tracing::info!(path = %path.display(), size, bytes, "Wrote PNG");

            let file = WrittenFile { kind: FileKind::Png, path, sizes: vec![size], bytes };
            on_progress(Progress::Written(&file));
            files.push(file);
        }

        let frames: Vec<_> = self
            .config
            .ico_sizes
            .iter()
            .map(|&size| resize_square(&enhanced, size))
            .collect();
        let path = self.config.output_dir.join(ICO_FILE_NAME);
        let bytes = write_ico(&frames, &path)?;
        tracing::info!(path = %path.display(), sizes = ?self.config.ico_sizes, bytes, "Wrote ICO");

        let file = WrittenFile {
            kind: FileKind::Ico,
            path,
            sizes: self.config.ico_sizes.clone(),
            bytes,
        };
        on_progress(Progress::Written(&file));
        files.push(file);

        Ok(FaviconReport {
            source: source.info,
            crop,
            files,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Enhancement;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join("bg.png");
        RgbImage::from_fn(width, height, |x, y| Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 90]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FaviconConfig { png_sizes: vec![], ..FaviconConfig::default() };
        assert!(matches!(FaviconDeriver::new(config), Err(FaviconError::InvalidConfig(_))));
    }

    #[test]
    fn test_progress_called_per_file() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir, 120, 80);
        let out = dir.path().join("out");
        let config = FaviconConfig {
            png_sizes: vec![16, 24],
            ico_sizes: vec![16],
            ..FaviconConfig::with_paths(input, &out)
        };
        let deriver = FaviconDeriver::new(config).unwrap();

        let mut seen = Vec::new();
        let report = deriver
            .derive_with_progress(|event| match event {
                Progress::Loaded { source, crop } => {
                    seen.push(format!("{}x{} {:?}", source.width, source.height, crop.as_box()))
                }
                Progress::Written(file) => seen.push(file.file_name()),
            })
            .unwrap();

        assert_eq!(
            seen,
            vec!["120x80 (20, 0, 100, 80)", "favicon_16x16.png", "favicon_24x24.png", "favicon.ico"]
        );
        assert_eq!(report.files.len(), deriver.total_files());
        assert_eq!(report.crop.as_box(), (20, 0, 100, 80));
        assert_eq!(report.pngs().count(), 2);
        assert_eq!(report.ico().unwrap().sizes, vec![16]);
        assert_eq!(report.total_bytes(), report.files.iter().map(|f| f.bytes).sum::<u64>());
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let deriver =
            FaviconDeriver::new(FaviconConfig::with_paths(dir.path().join("missing.jpg"), &out)).unwrap();

        let mut calls = 0;
        let err = deriver.derive_with_progress(|_| calls += 1).unwrap_err();

        assert!(err.is_missing_input());
        assert_eq!(calls, 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_no_enhancements_still_derives() {
        let dir = TempDir::new().unwrap();
        let input = write_source(&dir, 40, 40);
        let config = FaviconConfig {
            enhancements: Vec::<Enhancement>::new(),
            ..FaviconConfig::with_paths(input, dir.path())
        };
        let report = FaviconDeriver::new(config).unwrap().derive().unwrap();
        assert!(report.crop.is_full(40, 40));
        assert_eq!(report.files.len(), 7);
    }
}
