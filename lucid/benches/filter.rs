use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lucid::{filter, BlurMode, FilterConfig, Frame, SampleSet};

fn noisy_frames(width: usize, height: usize, count: usize) -> Vec<Frame> {
    (0..count)
        .map(|k| {
            let pixels = (0..width * height * 3)
                .map(|i| {
                    let h = (i as u64 ^ (k as u64) << 32).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                    0.1 + (h >> 40) as f64 / (1u64 << 24) as f64 * 0.8
                })
                .collect();
            Frame::from_pixels(width, height, pixels).unwrap()
        })
        .collect()
}

fn statistics_benchmarks(c: &mut Criterion) {
    let frames = noisy_frames(256, 256, 5);
    c.bench_function("sample_set_build_256x256x5", |b| {
        b.iter(|| SampleSet::build(std::hint::black_box(&frames)).unwrap())
    });
}

fn filter_benchmarks(c: &mut Criterion) {
    let set = SampleSet::build(&noisy_frames(128, 128, 5)).unwrap();
    let mut group = c.benchmark_group("filter_128x128x5");
    group.sample_size(10);
    for kernel_width in [3, 7] {
        for blur_mode in [BlurMode::Aggressive, BlurMode::Gentle] {
            let config = FilterConfig {
                blur_mode,
                kernel_width,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(blur_mode.to_string(), kernel_width),
                &config,
                |b, config| b.iter(|| filter(&set, config)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, statistics_benchmarks, filter_benchmarks);
criterion_main!(benches);
