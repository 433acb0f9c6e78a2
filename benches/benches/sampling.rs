// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use plotter::sampler::{SampleDomain, sample, sample_visible};
use plotter::{EvalError, GridAxis, grid};
use plotter_view::Viewport;

fn poly(_: &str, x: f64) -> Result<f64, EvalError> {
    Ok(0.5 * x * x * x - 2.0 * x + 1.0)
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    for &count in &[100_usize, 1_000, 10_000] {
        let domain = SampleDomain::over(-5.0..=5.0, count).unwrap();
        group.throughput(Throughput::Elements(domain.len() as u64));
        group.bench_with_input(BenchmarkId::new("over", count), &domain, |b, d| {
            b.iter(|| black_box(sample(&poly, "0.5*x^3-2*x+1", d)));
        });
    }

    let mut viewport = Viewport::new(Size::new(1920.0, 1080.0));
    viewport.set_scale(0.5);
    viewport.set_offset(Vec2::new(-3_000.0, 400.0));
    group.bench_function("visible_1080p", |b| {
        b.iter(|| black_box(sample_visible(&poly, "0.5*x^3-2*x+1", &viewport, 100)));
    });
    group.finish();
}

fn bench_grid_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_lines");
    for &scale in &[0.5, 1.0, 4.0] {
        let mut viewport = Viewport::new(Size::new(1920.0, 1080.0));
        viewport.set_scale(scale);
        let n = grid::grid_lines(&viewport, Vec2::new(50.0, 50.0))
            .iter()
            .filter(|l| l.axis == GridAxis::Vertical)
            .count();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("derive", scale), &viewport, |b, vp| {
            b.iter(|| black_box(grid::grid_lines(vp, Vec2::new(50.0, 50.0))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sampling, bench_grid_lines);
criterion_main!(benches);
