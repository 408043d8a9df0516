//! Benchmarks for favicon derivation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glasstones_favicon::{
    crop_to_square, resize_square, Enhancement, EnhancementChain, FaviconConfig, FaviconDeriver,
};
use image::{DynamicImage, Rgb, RgbImage};

fn source(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn bench_crop(c: &mut Criterion) {
    let img = source(1920, 1080);
    c.bench_function("crop_to_square_1080p", |b| b.iter(|| crop_to_square(black_box(&img))));
}

fn bench_enhance(c: &mut Criterion) {
    let img = source(512, 512);
    let chain = EnhancementChain::new([Enhancement::Contrast(1.3), Enhancement::Sharpness(1.2)]);
    c.bench_function("enhance_chain_512", |b| b.iter(|| chain.apply(black_box(&img))));
}

fn bench_resize(c: &mut Criterion) {
    let img = source(1080, 1080);
    c.bench_function("resize_lanczos_256", |b| b.iter(|| resize_square(black_box(&img), 256)));
}

fn bench_derive(c: &mut Criterion) {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("rust_bg.jpg");
    source(1200, 800).save(&input).unwrap();
    let deriver = FaviconDeriver::new(FaviconConfig::with_paths(&input, dir.path())).unwrap();

    let mut group = c.benchmark_group("derive");
    group.sample_size(10);
    group.bench_function("full_set_1200x800", |b| b.iter(|| deriver.derive().unwrap()));
    group.finish();
}

criterion_group!(benches, bench_crop, bench_enhance, bench_resize, bench_derive);
criterion_main!(benches);
