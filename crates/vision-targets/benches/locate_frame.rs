use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point2;
use vision_targets::core::Polygon;
use vision_targets::{LocatorConfig, TargetLocator};

/// `n` contours: mostly small square noise plus one tape strip per ten.
fn synthetic_frame(n: usize) -> Vec<Polygon> {
    (0..n)
        .map(|i| {
            let x = 20.0 + (i * 37 % 560) as f64;
            let y = 20.0 + (i * 53 % 380) as f64;
            let (w, h) = if i % 10 == 0 { (40.0, 80.0) } else { (12.0, 12.0) };
            Polygon::from_points(vec![
                Point2::new(x, y),
                Point2::new(x + w, y),
                Point2::new(x + w, y + h),
                Point2::new(x, y + h),
            ])
        })
        .collect()
}

fn bench_locate(c: &mut Criterion) {
    let locator = match TargetLocator::new(LocatorConfig::example()) {
        Ok(locator) => locator,
        Err(err) => panic!("example config must be valid: {err}"),
    };

    let mut group = c.benchmark_group("locate_frame");
    for n in [8usize, 64, 512] {
        let frame = synthetic_frame(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &frame, |b, frame| {
            b.iter(|| locator.locate(black_box(frame.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_locate);
criterion_main!(benches);
