//! Lane Filter Cycle Benchmarks
//!
//! Per-cycle cost of the histogram filter at the default grid size:
//! - predict: shift + separable Gaussian smoothing
//! - update: segment voting + Bayes product
//! - step: full predict/update/estimate cycle
//!
//! Run with: cargo bench --bench filter_cycle

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use laneloc_benchmarks::random_segments;
use laneloc_library::algorithms::histogram_filter::{gaussian_smooth, ProcessNoise};
use laneloc_library::{LaneFilter, LaneFilterConfig, WheelTicks};

/// Detections per frame to test
const SEGMENT_COUNTS: &[usize] = &[0, 16, 64, 256];

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");
    group.measurement_time(Duration::from_secs(5));

    let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
    group.bench_function("default_grid", |b| {
        b.iter(|| {
            filter.predict(black_box(WheelTicks::new(3, 4))).unwrap();
            filter.reset();
        });
    });

    let belief = filter.belief().clone();
    for &(sigma_d, sigma_phi) in &[(0.5, 0.5), (1.0, 2.0), (3.0, 3.0)] {
        let noise = ProcessNoise::new(sigma_d, sigma_phi).unwrap();
        group.bench_with_input(
            BenchmarkId::new("smoothing", format!("{sigma_d}x{sigma_phi}")),
            &noise,
            |b, noise| b.iter(|| gaussian_smooth(black_box(&belief), noise)),
        );
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    group.measurement_time(Duration::from_secs(5));

    for &count in SEGMENT_COUNTS {
        let segments = random_segments(count, 42);
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();

        group.bench_with_input(BenchmarkId::new("segments", count), &segments, |b, segments| {
            b.iter(|| {
                let _ = black_box(filter.update(black_box(segments)));
                filter.reset();
            });
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.measurement_time(Duration::from_secs(5));

    let frames: Vec<_> = (0..32).map(|seed| random_segments(32, seed)).collect();
    let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
    let mut frame = 0;

    group.bench_function("32_segments", |b| {
        b.iter(|| {
            if filter.step(WheelTicks::new(4, 5), &frames[frame % frames.len()]).is_err() {
                filter.reset();
            }
            frame += 1;
            black_box(filter.estimate())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_predict, bench_update, bench_step);
criterion_main!(benches);
