use criterion::{Criterion, criterion_group, criterion_main};
use pic_resample::{
    ImageSize, ImageStore, PixelLayout, ResamplingFunction, Scaler, Scaling, ThreadingPolicy,
    UnsharpenMask,
};
use std::sync::Arc;

const WIDTH: usize = 1600;
const HEIGHT: usize = 1200;

pub fn criterion_benchmark(c: &mut Criterion) {
    let src_bytes: Vec<u8> = (0..WIDTH * HEIGHT * 4)
        .map(|i| ((i * 13 + i / (WIDTH * 4) * 5) % 256) as u8)
        .collect();
    let store = ImageStore::from_slice(&src_bytes, WIDTH, HEIGHT, PixelLayout::Rgba8).unwrap();
    let downscale = ImageSize::new(WIDTH / 3, HEIGHT / 3);
    let upscale = ImageSize::new(WIDTH * 3 / 2, HEIGHT * 3 / 2);

    c.bench_function("Pic resample RGBA: Lanczos 3 downscale", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        b.iter(|| scaler.resize(&store, downscale).unwrap())
    });

    c.bench_function("Pic resample RGBA: Mitchell upscale", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::MitchellNetravalli);
        b.iter(|| scaler.resize(&store, upscale).unwrap())
    });

    c.bench_function("Pic resample RGBA: shared pool", |b| {
        let pool = Arc::new(rayon_pool());
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Fixed(pool.current_num_threads() + 1));
        scaler.set_thread_pool(Some(pool));
        b.iter(|| scaler.resize(&store, downscale).unwrap())
    });

    c.bench_function("Pic resample RGBA: Lanczos 3 + sharpen", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_unsharpen_mask(UnsharpenMask::Normal);
        b.iter(|| scaler.resize(&store, downscale).unwrap())
    });
}

fn rayon_pool() -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new().build().unwrap()
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
