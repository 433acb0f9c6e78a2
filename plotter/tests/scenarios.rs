// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the `plotter` widget, driven through its public
//! event API and observed on a recording surface.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{PathEl, Point, Size, Vec2};
use plotter::sampler::sample;
use plotter::{
    ConfigError, CursorIcon, EvalError, GridAxis, InputEvent, KeyCode, Nudge, Plotter,
    PlotterConfig, PlotterError, SampleDomain, SampleError, SurfaceHandle, ViewScaleConfig,
};
use plotter_imaging::{Color, SurfaceResolver};
use plotter_imaging_ref::RecordingSurface;

type Eval = fn(&str, f64) -> Result<f64, EvalError>;

fn square(_: &str, x: f64) -> Result<f64, EvalError> {
    Ok(x * x)
}

fn surface_500() -> RecordingSurface {
    RecordingSurface::new(Size::new(500.0, 500.0))
}

fn default_plotter() -> Plotter<RecordingSurface, Eval> {
    Plotter::new(surface_500(), square as Eval, PlotterConfig::default()).unwrap()
}

#[test]
fn default_construction_centres_origin_and_axes() {
    let mut p = default_plotter();
    assert_eq!(p.viewport().offset(), Vec2::new(250.0, 250.0));
    assert_eq!(p.viewport().scale(), 1.0);

    p.render();
    let axes: Vec<_> = p
        .surface()
        .stroked_paths()
        .filter(|(_, st)| st.stroke_color == Color::BLACK)
        .collect();
    assert_eq!(axes.len(), 2, "one path per axis");

    let pixels = |i: usize| -> Vec<Point> {
        let (path, st) = axes[i];
        path.elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(st.transform * p),
                _ => None,
            })
            .collect()
    };
    let x_axis = pixels(0);
    assert!(x_axis.iter().all(|p| p.y == 250.0), "{x_axis:?}");
    assert_eq!((x_axis[0].x, x_axis[1].x), (0.0, 500.0));
    let y_axis = pixels(1);
    assert!(y_axis.iter().all(|p| p.x == 250.0), "{y_axis:?}");
    assert_eq!((y_axis[0].y, y_axis[1].y), (0.0, 500.0));
}

#[test]
fn wheel_down_zooms_in_with_one_render() {
    let mut p = default_plotter();
    let r = p.handle_event(InputEvent::Wheel { delta_y: 120.0 });
    assert!(r.render);
    assert!((p.viewport().scale() - 1.1).abs() < 1e-12);
    assert_eq!(p.render_count(), 1);
    assert_eq!(p.viewport().offset(), Vec2::new(250.0, 250.0));
}

#[test]
fn ten_wheel_ups_clamp_at_min_scale() {
    let mut p = default_plotter();
    for _ in 0..10 {
        p.handle_event(InputEvent::Wheel { delta_y: -120.0 });
    }
    assert_eq!(p.viewport().scale(), 0.5);
    assert_eq!(p.render_count(), 10);
}

#[test]
fn zoom_stays_within_bounds_for_any_sequence() {
    let mut p = default_plotter();
    let deltas = [1.0, 1.0, -3.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0];
    for _ in 0..5 {
        for &d in &deltas {
            p.handle_event(InputEvent::Wheel { delta_y: d });
            let s = p.viewport().scale();
            assert!((0.5..=4.0).contains(&s), "scale {s}");
        }
    }
    assert_eq!(p.viewport().scale(), 4.0);
}

#[test]
fn square_is_non_negative_and_symmetric() {
    let domain = SampleDomain::over(-5.0..=5.0, 100).unwrap();
    let s = sample(&(square as Eval), "x*x", &domain);
    assert_eq!(s.points.len(), 101);
    assert!(s.issues.is_empty());
    let n = s.points.len();
    for (i, p) in s.points.iter().enumerate() {
        assert!(p.y >= 0.0, "{p:?}");
        let mirror = s.points[n - 1 - i];
        assert!((p.x + mirror.x).abs() < 1e-9, "{p:?} vs {mirror:?}");
        assert!((p.y - mirror.y).abs() < 1e-9, "{p:?} vs {mirror:?}");
    }
}

#[test]
fn square_over_the_visible_domain() {
    let config = PlotterConfig {
        offset_x: Some(200.0),
        ..PlotterConfig::default()
    };
    let surface = RecordingSurface::new(Size::new(200.0, 200.0));
    let p = Plotter::new(surface, square as Eval, config).unwrap();
    let s = p.sample();
    assert!(s.issues.is_empty());
    // 10 cells at 100 samples per 4 cells of visible width.
    assert_eq!(s.points.len(), 251);
    assert_eq!(s.points[0].x, -5.0);
    assert!((s.points[250].x - 5.0).abs() < 1e-9);
    for p in &s.points {
        assert!(p.y >= 0.0, "{p:?}");
        assert!((p.y - p.x * p.x).abs() < 1e-12, "{p:?}");
    }
}

#[test]
fn far_away_offsets_render_without_panicking() {
    for off in [-1e21, 1e21] {
        let config = PlotterConfig {
            offset_x: Some(off),
            offset_y: Some(off),
            ..PlotterConfig::default()
        };
        let mut p = Plotter::new(surface_500(), square as Eval, config).unwrap();
        let report = p.render();
        assert!(report.grid_lines > 0, "offset {off}");
        assert_eq!(p.surface().current_state().save_depth, 0);
    }
}

#[test]
fn dense_sampling_is_cut_and_reported() {
    let config = PlotterConfig {
        sample_count: 1_000_000,
        ..PlotterConfig::default()
    };
    let p = Plotter::new(surface_500(), square as Eval, config).unwrap();
    let s = p.sample();
    let domain = SampleDomain::visible(p.viewport(), 1_000_000).unwrap();
    assert!(domain.is_truncated());
    assert_eq!(s.points.len(), domain.len());
    assert!(
        s.issues
            .iter()
            .any(|e| matches!(e, SampleError::Truncated { .. })),
        "{:?}",
        s.issues.first()
    );
}

#[test]
fn tiny_grid_cells_are_reported() {
    let config = PlotterConfig {
        view_scale: ViewScaleConfig {
            width: 0.1,
            ..ViewScaleConfig::default()
        },
        ..PlotterConfig::default()
    };
    let mut p = Plotter::new(surface_500(), square as Eval, config).unwrap();
    let report = p.render();
    assert!(report.grid_truncated);
    assert!(!report.is_clean());
}

#[test]
fn sampling_is_repeatable() {
    let mut p = default_plotter();
    p.handle_event(InputEvent::PointerDown(Point::new(0.0, 0.0)));
    p.handle_event(InputEvent::PointerMove(Point::new(-37.0, 12.0)));
    assert_eq!(p.sample(), p.sample());
}

#[test]
fn screen_world_round_trip() {
    let mut p = default_plotter();
    p.handle_event(InputEvent::Wheel { delta_y: 1.0 });
    p.handle_event(InputEvent::PointerDown(Point::new(10.0, 10.0)));
    p.handle_event(InputEvent::PointerMove(Point::new(83.0, -41.0)));
    for &(x, y) in &[(0.0, 0.0), (250.0, 250.0), (499.0, 1.0), (-20.0, 713.5)] {
        let px = Point::new(x, y);
        let back = p.world_to_screen(p.screen_to_world(px));
        assert!((back - px).hypot() < 1e-9, "{px:?} -> {back:?}");
    }
}

#[test]
fn drag_pans_by_delta_over_scale_and_notifies() {
    let drags = Rc::new(Cell::new(0_u32));
    let seen = Rc::clone(&drags);
    let mut p = default_plotter().on_drag(move || seen.set(seen.get() + 1));
    p.viewport_mut().set_scale(2.0);

    let r = p.handle_event(InputEvent::PointerDown(Point::new(100.0, 100.0)));
    assert_eq!(r.cursor, CursorIcon::AllScroll);
    p.handle_event(InputEvent::PointerMove(Point::new(110.0, 100.0)));
    p.handle_event(InputEvent::PointerMove(Point::new(130.0, 80.0)));
    p.handle_event(InputEvent::PointerUp(Point::new(130.0, 80.0)));

    assert_eq!(p.viewport().offset(), Vec2::new(265.0, 240.0));
    assert_eq!(drags.get(), 2);
    assert_eq!(p.render_count(), 2);
    assert_eq!(p.cursor(), CursorIcon::Default);
}

#[test]
fn keyboard_ramp_needs_focus_and_resets_on_key_up() {
    let drags = Rc::new(Cell::new(0_u32));
    let seen = Rc::clone(&drags);
    let mut p = default_plotter().on_drag(move || seen.set(seen.get() + 1));

    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
    assert_eq!(p.render_count(), 0);
    assert_eq!(drags.get(), 0);

    p.pointer_down_observed(true);
    for _ in 0..3 {
        p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
    }
    assert_eq!(p.controller().nudge_velocity_x(), 3.0);
    assert_eq!(p.viewport().offset().x, 256.0);
    assert_eq!(p.render_count(), 3);
    assert_eq!(drags.get(), 3);

    p.handle_event(InputEvent::KeyUp(KeyCode::ArrowRight));
    assert_eq!(p.controller().nudge_velocity_x(), 0.0);
    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowLeft));
    assert_eq!(p.viewport().offset().x, 255.0);

    // A click elsewhere on the page takes focus away.
    p.pointer_down_observed(false);
    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowLeft));
    assert_eq!(p.viewport().offset().x, 255.0);
}

#[test]
fn keyboard_ramp_never_exceeds_its_maximum() {
    let config = PlotterConfig {
        max_nudge_x: 4.0,
        ..PlotterConfig::default()
    };
    let mut p = Plotter::new(surface_500(), square as Eval, config).unwrap();
    p.pointer_down_observed(true);
    for n in 1..=10_u32 {
        p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
        let v = p.controller().nudge_velocity_x();
        assert_eq!(v, f64::from(n.min(4)), "after {n} key-downs");
    }
}

struct Marker {
    at: Point,
}

impl Nudge for Marker {
    fn position(&self) -> Point {
        self.at
    }

    fn set_position(&mut self, position: Point) {
        self.at = position;
    }
}

#[test]
fn selection_is_nudged_instead_of_the_view() {
    let marker = Rc::new(RefCell::new(Marker {
        at: Point::new(2.0, 3.0),
    }));
    let mut p = default_plotter().with_selection(&marker);
    p.pointer_down_observed(true);

    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
    assert_eq!(marker.borrow().at, Point::new(5.0, 3.0));
    assert_eq!(p.viewport().offset(), Vec2::new(250.0, 250.0));
    assert_eq!(p.render_count(), 2);

    p.clear_selection();
    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowRight));
    assert_eq!(p.viewport().offset().x, 253.0);
    assert_eq!(marker.borrow().at, Point::new(5.0, 3.0));
}

#[test]
fn vertical_grid_labels_count_up_by_one() {
    let mut p = default_plotter();
    p.handle_event(InputEvent::PointerDown(Point::new(0.0, 0.0)));
    for step in [7.0, 130.0, -411.0, 58.25] {
        p.handle_event(InputEvent::PointerMove(Point::new(step, 0.0)));
        let labels: Vec<f64> = p
            .grid_lines()
            .into_iter()
            .filter(|l| l.axis == GridAxis::Vertical)
            .map(|l| l.label.parse().unwrap())
            .collect();
        assert!(labels.len() > 2);
        for pair in labels.windows(2) {
            assert_eq!(pair[1] - pair[0], 1.0, "{labels:?}");
        }
    }
}

#[test]
fn bad_samples_are_reported_not_drawn() {
    let eval = |_: &str, x: f64| -> Result<f64, EvalError> {
        if x < -5.0 {
            Err(EvalError::parse("1/x", "unexpected token"))
        } else if x.abs() < 0.05 {
            Ok(f64::INFINITY)
        } else {
            Ok(1.0 / x)
        }
    };
    let mut p = Plotter::new(surface_500(), eval, PlotterConfig::default()).unwrap();
    let report = p.render();

    assert!(!report.is_clean());
    let skipped = report
        .issues
        .iter()
        .filter(|e| matches!(e, SampleError::Evaluation { .. }))
        .count();
    let non_finite = report
        .issues
        .iter()
        .filter(|e| matches!(e, SampleError::NonFinite { .. }))
        .count();
    assert!(skipped > 0);
    assert_eq!(non_finite, 1);
    assert_eq!(report.samples + skipped, 171);
    assert_eq!(report.points_drawn, report.samples - non_finite);

    let blue = Color::from_rgb8(0, 0, 0xff);
    let (curve, _) = p
        .surface()
        .stroked_paths()
        .find(|(_, st)| st.stroke_color == blue)
        .unwrap();
    let subpaths = curve
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    assert_eq!(subpaths, 2);
    assert!(curve.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
        _ => true,
    }));
}

#[derive(Default)]
struct Registry {
    surfaces: HashMap<String, RecordingSurface>,
}

impl SurfaceResolver for Registry {
    type Surface = RecordingSurface;

    fn resolve(&mut self, key: &str) -> Option<RecordingSurface> {
        self.surfaces.remove(key)
    }
}

#[test]
fn lookup_resolves_or_fails_fast() {
    let mut registry = Registry::default();
    registry.surfaces.insert("#plot".into(), surface_500());

    let p = Plotter::from_handle(
        SurfaceHandle::Lookup("#plot".into()),
        &mut registry,
        square as Eval,
        PlotterConfig::default(),
    )
    .unwrap();
    assert_eq!(p.viewport().surface_size(), Size::new(500.0, 500.0));

    let err = Plotter::from_handle(
        SurfaceHandle::Lookup("#missing".into()),
        &mut registry,
        square as Eval,
        PlotterConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(&err, PlotterError::SurfaceNotFound { key } if key == "#missing"));
    assert_eq!(err.to_string(), "drawing surface `#missing` not found");

    let direct = Plotter::from_handle(
        surface_500().into(),
        &mut registry,
        square as Eval,
        PlotterConfig::default(),
    );
    assert!(direct.is_ok());
}

#[test]
fn json_config_drives_construction() {
    let config: PlotterConfig = serde_json::from_str(
        r#"{
            "offsetX": 100,
            "scale": 2,
            "vScale": { "width": 25, "vWidth": 2 },
            "generatrix": "x*x",
            "origin": { "x": 5 }
        }"#,
    )
    .unwrap();
    let p = Plotter::new(surface_500(), square as Eval, config).unwrap();
    assert_eq!(p.viewport().offset(), Vec2::new(100.0, 250.0));
    assert_eq!(p.viewport().scale(), 2.0);
    assert_eq!(p.viewport().view_scale().width, 25.0);
    assert_eq!(p.viewport().view_scale().v_height, 5.0);
    assert_eq!(p.viewport().origin(), Point::new(5.0, 0.0));
    assert_eq!(p.generatrix(), "x*x");
}

#[test]
fn invalid_config_is_rejected() {
    let config = PlotterConfig {
        min_scale: 0.0,
        ..PlotterConfig::default()
    };
    let err = Plotter::new(surface_500(), square as Eval, config).unwrap_err();
    assert!(matches!(
        err,
        PlotterError::InvalidConfig(ConfigError::NonPositive {
            field: "minScale",
            ..
        })
    ));
}

#[test]
fn every_render_restores_surface_state() {
    let mut p = default_plotter();
    p.pointer_down_observed(true);
    p.handle_event(InputEvent::Wheel { delta_y: 1.0 });
    p.handle_event(InputEvent::KeyDown(KeyCode::ArrowDown));
    p.handle_event(InputEvent::PointerDown(Point::new(1.0, 1.0)));
    p.handle_event(InputEvent::PointerMove(Point::new(9.0, 4.0)));
    assert_eq!(p.render_count(), 3);
    assert_eq!(p.surface().current_state().save_depth, 0);
    assert_eq!(p.surface().unbalanced_restores(), 0);
}
