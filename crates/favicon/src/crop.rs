//! Centered square cropping.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// The largest square centered within a `width` x `height` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge (inclusive)
    pub left: u32,
    /// Top edge (inclusive)
    pub top: u32,
    /// Side length, `min(width, height)`
    pub size: u32,
}

impl CropRegion {
    /// Compute the centered square for the given dimensions.
    ///
    /// Offsets use floor division, so odd remainders favour the left/top.
    ///
    /// # Example
    /// ```
    /// use glasstones_favicon::CropRegion;
    ///
    /// let region = CropRegion::centered(1000, 600);
    /// assert_eq!(region.as_box(), (200, 0, 800, 600));
    /// ```
    pub fn centered(width: u32, height: u32) -> Self {
        let size = width.min(height);
        Self {
            left: (width - size) / 2,
            top: (height - size) / 2,
            size,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u32 {
        self.left + self.size
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u32 {
        self.top + self.size
    }

    /// `(left, top, right, bottom)`.
    pub fn as_box(&self) -> (u32, u32, u32, u32) {
        (self.left, self.top, self.right(), self.bottom())
    }

    /// Check if the region covers the whole image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.left == 0 && self.top == 0 && self.size == width && self.size == height
    }
}

/// Crop `image` to its centered square. The source is left untouched.
pub fn crop_to_square(image: &DynamicImage) -> (DynamicImage, CropRegion) {
    let region = CropRegion::centered(image.width(), image.height());
    let square = image.crop_imm(region.left, region.top, region.size, region.size);
    (square, region)
}
