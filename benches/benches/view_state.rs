// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_geoview` conversions on the render hot path.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_geoview::{EastNorth, OutsideFlags, ViewState, WebMercator};

fn state() -> ViewState {
    ViewState::create_default(Arc::new(WebMercator), 1400.0, 1050.0)
        .expect("web mercator provides world bounds")
}

/// A zig-zag polyline spread well beyond the viewport.
fn polyline(len: usize) -> Vec<EastNorth> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            EastNorth::new(t * 13.7 - 20_000.0, if i % 2 == 0 { 4_000.0 } else { -4_000.0 })
        })
        .collect()
}

fn bench_planar_to_view(c: &mut Criterion) {
    let state = state();
    let mut group = c.benchmark_group("geoview/planar_to_view");

    // Hypothesis: `point_for` per vertex and the raw matrix cost the same once
    // inlined; the matrix path is what renderers use for whole ways.
    for len in [1_024usize, 65_536] {
        let points = polyline(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("point_for", len), &points, |b, points| {
            b.iter(|| {
                let mut acc = 0.0;
                for en in points {
                    acc += state.point_for(*en).in_view_x();
                }
                black_box(acc)
            });
        });

        group.bench_with_input(BenchmarkId::new("affine", len), &points, |b, points| {
            let transform = state.affine_transform();
            b.iter(|| {
                let mut acc = 0.0;
                for en in points {
                    acc += (transform * Point::from(*en)).x;
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_view_to_planar(c: &mut Criterion) {
    let state = state();
    let mut group = c.benchmark_group("geoview/view_to_planar");
    let len = 65_536usize;
    group.throughput(Throughput::Elements(len as u64));

    group.bench_function("east_north", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..len {
                let t = i as f64;
                acc += state.for_view(t * 0.03, t * 0.02).east_north().east;
            }
            black_box(acc)
        });
    });

    group.bench_function("lat_lon", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..len {
                let t = i as f64;
                acc += state.for_view(t * 0.03, t * 0.02).lat_lon().lat;
            }
            black_box(acc)
        });
    });

    group.finish();
}

fn bench_outside_flags(c: &mut Criterion) {
    let state = state();
    let area = state.view_area();
    let points = polyline(65_536);
    let mut group = c.benchmark_group("geoview/outside_flags");
    group.throughput(Throughput::Elements(points.len() as u64));

    // Cull segments whose endpoints share an outside half-plane.
    group.bench_function("segment_cull", |b| {
        b.iter(|| {
            let mut culled = 0_usize;
            let mut prev = OutsideFlags::empty();
            for (i, en) in points.iter().enumerate() {
                let flags = state.point_for(*en).outside_rectangle_flags(&area);
                if i > 0 && !(flags & prev).is_empty() {
                    culled += 1;
                }
                prev = flags;
            }
            black_box(culled)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_planar_to_view,
    bench_view_to_planar,
    bench_outside_flags
);
criterion_main!(benches);
