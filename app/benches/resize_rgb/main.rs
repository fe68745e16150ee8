use criterion::{Criterion, criterion_group, criterion_main};
use fast_image_resize::FilterType::Lanczos3;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer};
use pic_resample::{
    ImageSize, ImageStore, PixelLayout, ResamplingFunction, Scaler, Scaling, ThreadingPolicy,
};

const WIDTH: usize = 1920;
const HEIGHT: usize = 1280;

fn synthetic_rgb() -> Vec<u8> {
    (0..WIDTH * HEIGHT * 3)
        .map(|i| ((i * 31 + i / (WIDTH * 3) * 7) % 256) as u8)
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let src_bytes = synthetic_rgb();
    let store = ImageStore::from_slice(&src_bytes, WIDTH, HEIGHT, PixelLayout::Rgb8).unwrap();
    let target = ImageSize::new(WIDTH / 4, HEIGHT / 4);

    c.bench_function("Pic resample RGB: Lanczos 3 single", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Single);
        b.iter(|| scaler.resize(&store, target).unwrap())
    });

    c.bench_function("Pic resample RGB: Lanczos 3 adaptive", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Lanczos3);
        scaler.set_threading_policy(ThreadingPolicy::Adaptive);
        b.iter(|| scaler.resize(&store, target).unwrap())
    });

    c.bench_function("Pic resample RGB: Bilinear adaptive", |b| {
        let mut scaler = Scaler::new(ResamplingFunction::Bilinear);
        b.iter(|| scaler.resize(&store, target).unwrap())
    });

    c.bench_function("Fast image resize RGB: Lanczos 3", |b| {
        let mut vc = src_bytes.clone();
        let pixel_type: PixelType = PixelType::U8x3;

        let src_image =
            Image::from_slice_u8(WIDTH as u32, HEIGHT as u32, &mut vc, pixel_type).unwrap();
        b.iter(|| {
            let mut dst_image = Image::new(
                target.width as u32,
                target.height as u32,
                pixel_type,
            );

            let mut resizer = Resizer::new();
            resizer
                .resize(
                    &src_image,
                    &mut dst_image,
                    &ResizeOptions::new()
                        .resize_alg(ResizeAlg::Convolution(Lanczos3))
                        .use_alpha(false),
                )
                .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
