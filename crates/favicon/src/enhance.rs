//! Contrast and sharpness enhancement.
//!
//! Each enhancer blends the input away from a "degenerate" reference image:
//! a factor of `1.0` returns the input, `0.0` returns the reference, and
//! values above one push past the input. Alpha is carried through untouched.

use image::{ColorType, DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// One named enhancement step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "factor", rename_all = "lowercase")]
pub enum Enhancement {
    /// Blend against a flat grey at the mean luminance
    Contrast(f32),
    /// Blend against a 3x3 smoothed copy
    Sharpness(f32),
}

impl Enhancement {
    /// Blend factor.
    pub fn factor(&self) -> f32 {
        match self {
            Enhancement::Contrast(f) | Enhancement::Sharpness(f) => *f,
        }
    }

    /// Short name for logs and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Enhancement::Contrast(_) => "contrast",
            Enhancement::Sharpness(_) => "sharpness",
        }
    }

    /// Apply this step, returning a new image.
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        let rgba = image.to_rgba8();
        let enhanced = match *self {
            Enhancement::Contrast(factor) => contrast(&rgba, factor),
            Enhancement::Sharpness(factor) => sharpness(&rgba, factor),
        };
        restore_layout(image, enhanced)
    }
}

/// Enhancements applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancementChain(Vec<Enhancement>);

impl EnhancementChain {
    /// Build a chain from ordered steps.
    pub fn new(steps: impl Into<Vec<Enhancement>>) -> Self {
        Self(steps.into())
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[Enhancement] {
        &self.0
    }

    /// Run every step in order. An empty chain returns a copy of the input.
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        let mut current = image.clone();
        for step in &self.0 {
            tracing::debug!(step = step.name(), factor = step.factor(), "Applying enhancement");
            current = step.apply(&current);
        }
        current
    }
}

impl From<Vec<Enhancement>> for EnhancementChain {
    fn from(steps: Vec<Enhancement>) -> Self {
        Self(steps)
    }
}

/// Grey sources stay grey; other sources come back as 8-bit RGB or RGBA.
fn restore_layout(original: &DynamicImage, enhanced: RgbaImage) -> DynamicImage {
    let enhanced = DynamicImage::ImageRgba8(enhanced);
    match original.color() {
        ColorType::L8 | ColorType::L16 => DynamicImage::ImageLuma8(enhanced.to_luma8()),
        ColorType::La8 | ColorType::La16 => DynamicImage::ImageLumaA8(enhanced.to_luma_alpha8()),
        color if color.has_alpha() => enhanced,
        _ => DynamicImage::ImageRgb8(enhanced.to_rgb8()),
    }
}

#[inline]
fn blend(degenerate: f32, value: f32, factor: f32) -> u8 {
    let mixed = (degenerate + factor * (value - degenerate)) as i32;
    mixed.clamp(0, 255) as u8
}

/// ITU-R 601-2 luma in 16.16 fixed point.
#[inline]
fn luma(px: &Rgba<u8>) -> u32 {
    let [r, g, b, _] = px.0;
    (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16
}

fn mean_luma(image: &RgbaImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image.pixels().map(|px| luma(px) as u64).sum();
    (sum as f64 / count as f64 + 0.5) as u8
}

fn contrast(image: &RgbaImage, factor: f32) -> RgbaImage {
    let grey = mean_luma(image) as f32;
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0;
        *px = Rgba([
            blend(grey, r as f32, factor),
            blend(grey, g as f32, factor),
            blend(grey, b as f32, factor),
            a,
        ]);
    }
    out
}

/// 3x3 smoothing kernel, scale 13. Border pixels are copied unchanged.
fn smooth(image: &RgbaImage) -> RgbaImage {
    const KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
    const SCALE: f32 = 13.0;

    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0u32; 3];
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let px = image.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1);
                    for (sum, channel) in sums.iter_mut().zip(px.0) {
                        *sum += weight * channel as u32;
                    }
                }
            }
            let alpha = image.get_pixel(x, y).0[3];
            let [r, g, b] = sums.map(|s| (s as f32 / SCALE + 0.5).min(255.0) as u8);
            out.put_pixel(x, y, Rgba([r, g, b, alpha]));
        }
    }
    out
}

fn sharpness(image: &RgbaImage, factor: f32) -> RgbaImage {
    let degenerate = smooth(image);
    let mut out = image.clone();
    for (px, soft) in out.pixels_mut().zip(degenerate.pixels()) {
        let [r, g, b, a] = px.0;
        let [sr, sg, sb, _] = soft.0;
        *px = Rgba([
            blend(sr as f32, r as f32, factor),
            blend(sg as f32, g as f32, factor),
            blend(sb as f32, b as f32, factor),
            a,
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma, Rgb, RgbImage};

    fn checkerboard(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 { Rgb([200, 200, 200]) } else { Rgb([50, 50, 50]) }
        })
    }

    #[test]
    fn test_blend_clamps() {
        assert_eq!(blend(100.0, 250.0, 2.0), 255);
        assert_eq!(blend(100.0, 0.0, 2.0), 0);
        assert_eq!(blend(100.0, 150.0, 1.0), 150);
        assert_eq!(blend(100.0, 150.0, 0.0), 100);
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(&Rgba([255, 255, 255, 255])), 255);
        assert_eq!(luma(&Rgba([0, 0, 0, 255])), 0);
        assert_eq!(luma(&Rgba([255, 0, 0, 255])), 76);
    }

    #[test]
    fn test_contrast_spreads_around_mean() {
        // mean luma of a 2x1 image [100, 200] is 150
        let img = RgbaImage::from_vec(2, 1, vec![100, 100, 100, 255, 200, 200, 200, 255]).unwrap();
        let out = contrast(&img, 1.5);
        assert_eq!(out.get_pixel(0, 0).0, [75, 75, 75, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [225, 225, 225, 255]);
    }

    #[test]
    fn test_contrast_flat_image_is_stable() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([90, 90, 90, 128]));
        assert_eq!(contrast(&img, 1.3), img);
    }

    #[test]
    fn test_factor_one_is_identity() {
        let img = DynamicImage::ImageRgb8(checkerboard(8));
        assert_eq!(Enhancement::Contrast(1.0).apply(&img), img);
        assert_eq!(Enhancement::Sharpness(1.0).apply(&img), img);
    }

    #[test]
    fn test_smooth_keeps_borders() {
        let rgba = DynamicImage::ImageRgb8(checkerboard(5)).to_rgba8();
        let soft = smooth(&rgba);
        for x in 0..5 {
            assert_eq!(soft.get_pixel(x, 0), rgba.get_pixel(x, 0));
            assert_eq!(soft.get_pixel(x, 4), rgba.get_pixel(x, 4));
        }
        // centre (2,2) is light: (5*200 + 4*200 + 4*50) / 13 = 153.8 -> 154
        assert_eq!(soft.get_pixel(2, 2).0, [154, 154, 154, 255]);
    }

    #[test]
    fn test_sharpness_pushes_away_from_smoothed() {
        let img = DynamicImage::ImageRgb8(checkerboard(5));
        let out = Enhancement::Sharpness(1.2).apply(&img);
        // 154 + 1.2 * (200 - 154) = 209.2 -> 209
        assert_eq!(out.get_pixel(2, 2).0, [209, 209, 209, 255]);
        // border untouched since degenerate equals input there
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(0, 0));
    }

    #[test]
    fn test_tiny_image_sharpness_unchanged() {
        let img = DynamicImage::ImageRgb8(checkerboard(2));
        assert_eq!(Enhancement::Sharpness(1.2).apply(&img), img);
    }

    #[test]
    fn test_layout_preserved() {
        let rgb = DynamicImage::ImageRgb8(checkerboard(4));
        assert_eq!(Enhancement::Contrast(1.3).apply(&rgb).color(), ColorType::Rgb8);

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 77])));
        let out = Enhancement::Sharpness(1.2).apply(&rgba);
        assert_eq!(out.color(), ColorType::Rgba8);
        assert!(out.pixels().all(|(_, _, px)| px.0[3] == 77));
    }

    #[test]
    fn test_grey_source_stays_grey() {
        let grey = GrayImage::from_fn(6, 6, |x, y| if (x + y) % 2 == 0 { Luma([200]) } else { Luma([50]) });
        let chain = EnhancementChain::new([Enhancement::Contrast(1.3), Enhancement::Sharpness(1.2)]);

        let out = chain.apply(&DynamicImage::ImageLuma8(grey));
        assert_eq!(out.color(), ColorType::L8);

        let from_rgb = chain.apply(&DynamicImage::ImageRgb8(checkerboard(6)));
        assert_eq!(out.to_luma8().into_raw(), from_rgb.to_luma8().into_raw());
    }

    #[test]
    fn test_grey_alpha_source_keeps_alpha() {
        let img = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(4, 4, image::LumaA([120, 33])));
        let out = Enhancement::Contrast(1.3).apply(&img);
        assert_eq!(out.color(), ColorType::La8);
        assert!(out.to_luma_alpha8().pixels().all(|px| px.0 == [120, 33]));
    }

    #[test]
    fn test_chain_applies_in_order() {
        let img = DynamicImage::ImageRgb8(checkerboard(6));
        let forward = EnhancementChain::new([Enhancement::Contrast(1.3), Enhancement::Sharpness(1.2)]);
        let manual = Enhancement::Sharpness(1.2).apply(&Enhancement::Contrast(1.3).apply(&img));
        assert_eq!(forward.apply(&img), manual);
        assert_eq!(forward.steps().len(), 2);
    }

    #[test]
    fn test_empty_chain_copies() {
        let img = DynamicImage::ImageRgb8(checkerboard(3));
        assert_eq!(EnhancementChain::default().apply(&img), img);
    }
}
