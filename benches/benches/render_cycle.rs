// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use plotter::{EvalError, InputEvent, Plotter, PlotterConfig};
use plotter_imaging_ref::RecordingSurface;

type Eval = fn(&str, f64) -> Result<f64, EvalError>;

fn sine(_: &str, x: f64) -> Result<f64, EvalError> {
    Ok(x.sin())
}

fn plotter() -> Plotter<RecordingSurface, Eval> {
    Plotter::new(
        RecordingSurface::new(Size::new(800.0, 600.0)),
        sine as Eval,
        PlotterConfig::default(),
    )
    .unwrap()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_cycle");

    group.bench_function("full_redraw", |b| {
        b.iter_batched(
            plotter,
            |mut p| black_box(p.render()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("drag_sequence_16", |b| {
        b.iter_batched(
            plotter,
            |mut p| {
                p.handle_event(InputEvent::PointerDown(Point::new(400.0, 300.0)));
                for i in 1..=16 {
                    let x = 400.0 + f64::from(i) * 3.0;
                    black_box(p.handle_event(InputEvent::PointerMove(Point::new(x, 300.0))));
                }
                p.handle_event(InputEvent::PointerUp(Point::new(448.0, 300.0)));
                p.render_count()
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
