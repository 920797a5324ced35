use std::f64::consts::PI;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use curvspeed_core::prelude::*;
use geo::{LineString, coord};

fn winding_segment(seed: usize) -> LineString<f64> {
    let radius = 300.0 + (seed % 17) as f64 * 150.0;
    (0..=180)
        .map(|deg| {
            let rad = deg as f64 * PI / 360.0;
            coord! { x: radius * rad.cos() + seed as f64, y: radius * rad.sin() }
        })
        .collect()
}

fn bench_evaluation(c: &mut Criterion) {
    let config = CurvatureConfig::default();
    let segments: Vec<SegmentRecord> = (0..2_000)
        .map(|i| {
            SegmentRecord::new(format!("corridor_{}", i % 40), winding_segment(i)).with_length(1.0)
        })
        .collect();

    c.bench_function("segment_curvature_speed", |b| {
        let line = winding_segment(3);
        b.iter(|| segment_curvature_speed(black_box(&line), &config));
    });

    c.bench_function("evaluate_segments_2000", |b| {
        b.iter(|| evaluate_segments(black_box(&segments), &config, &Progress::new()));
    });

    let evaluated = evaluate_segments(&segments, &config, &Progress::new()).unwrap();
    c.bench_function("aggregate_2000", |b| {
        b.iter(|| aggregate(black_box(&evaluated)));
    });
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);
