//! Benchmark tests for grid metrics and layout passes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unigrid_core::{GridBox, Insets};
use unigrid_layout::{AvailableWidth, GridMetricsCalculator, HorizontalGap, UniformGridLayout};

fn mixed_boxes(n: usize) -> Vec<GridBox> {
    (0..n)
        .map(|i| {
            let w = 40 + (i as u32 * 37) % 80;
            let h = 20 + (i as u32 * 13) % 40;
            GridBox::new(w, h).with_visible(i % 7 != 0)
        })
        .collect()
}

fn bench_metrics_dynamic(c: &mut Criterion) {
    let boxes = mixed_boxes(100);

    c.bench_function("metrics_dynamic_100_boxes", |b| {
        b.iter(|| {
            GridMetricsCalculator::compute(
                black_box(&boxes),
                black_box(AvailableWidth::Bounded(1280)),
                black_box(Insets::uniform(8)),
                black_box(HorizontalGap::Dynamic),
            )
        })
    });
}

fn bench_metrics_fixed(c: &mut Criterion) {
    let boxes = mixed_boxes(100);

    c.bench_function("metrics_fixed_100_boxes", |b| {
        b.iter(|| {
            GridMetricsCalculator::compute(
                black_box(&boxes),
                black_box(AvailableWidth::Bounded(1280)),
                black_box(Insets::uniform(8)),
                black_box(HorizontalGap::Fixed(6)),
            )
        })
    });
}

fn bench_layout_10_boxes(c: &mut Criterion) {
    let mut layout = UniformGridLayout::new().with_v_gap(4);
    let mut boxes = mixed_boxes(10);

    c.bench_function("layout_10_boxes", |b| {
        b.iter(|| layout.perform_layout(black_box(AvailableWidth::Bounded(800)), &mut boxes))
    });
}

fn bench_layout_1000_boxes(c: &mut Criterion) {
    let mut layout = UniformGridLayout::new().with_v_gap(4);
    let mut boxes = mixed_boxes(1000);

    c.bench_function("layout_1000_boxes", |b| {
        b.iter(|| layout.perform_layout(black_box(AvailableWidth::Bounded(1920)), &mut boxes))
    });
}

fn bench_resize_sweep(c: &mut Criterion) {
    let mut layout = UniformGridLayout::new().with_insets(Insets::uniform(10));
    let mut boxes = mixed_boxes(200);

    c.bench_function("layout_resize_sweep_200_boxes", |b| {
        b.iter(|| {
            for width in (200..1600).step_by(100) {
                layout.perform_layout(AvailableWidth::Bounded(black_box(width)), &mut boxes);
            }
        })
    });
}

fn bench_preferred_size(c: &mut Criterion) {
    let layout = UniformGridLayout::new().with_v_gap(4);
    let boxes = mixed_boxes(100);

    c.bench_function("preferred_size_100_boxes", |b| {
        b.iter(|| layout.preferred_size(black_box(AvailableWidth::Bounded(1024)), &boxes))
    });
}

criterion_group!(
    benches,
    bench_metrics_dynamic,
    bench_metrics_fixed,
    bench_layout_10_boxes,
    bench_layout_1000_boxes,
    bench_resize_sweep,
    bench_preferred_size,
);
criterion_main!(benches);
