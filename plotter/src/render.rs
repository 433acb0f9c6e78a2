// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render cycle: clear, transform, grid, axes, curve.

use std::f64::consts::TAU;

use kurbo::{Arc, BezPath, Point, Vec2};
use plotter_imaging::{Color, DrawOp, StateOp, Surface, SurfaceExt};
use plotter_view::Viewport;

use crate::error::SampleError;
use crate::eval::Evaluator;
use crate::grid::{GridRenderer, grid_truncated};
use crate::sampler::{Samples, sample_visible};

/// Radius of a point marker, in layer units.
pub const DOT_RADIUS: f64 = 1.0;

/// How sampled points are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    /// Stroke color for the line and the markers.
    pub color: Color,
    /// Draw a small circle at every point.
    pub dots: bool,
    /// Connect consecutive points with a line.
    pub line: bool,
}

impl Default for DrawOptions {
    /// A blue connecting line without markers.
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x00, 0x00, 0xff),
            dots: false,
            line: true,
        }
    }
}

/// Draws plotted points, mapping them through [`Viewport::plot_to_layer`].
///
/// The connecting line is broken at every point with a non-finite
/// coordinate, and such points get no marker. Returns the number of points
/// that were drawn.
pub fn draw_points<S>(
    surface: &mut S,
    viewport: &Viewport,
    points: &[Point],
    options: &DrawOptions,
) -> usize
where
    S: Surface + ?Sized,
{
    surface.with_saved(|s| {
        s.state(StateOp::SetStrokeColor(options.color));
        let mut path = BezPath::new();
        let mut pen_down = false;
        let mut drawn = 0;
        for &p in points {
            let at = viewport.plot_to_layer(p);
            if !at.is_finite() {
                pen_down = false;
                continue;
            }
            drawn += 1;
            if options.line {
                if pen_down {
                    path.line_to(at);
                } else {
                    path.move_to(at);
                    pen_down = true;
                }
            }
            if options.dots {
                s.draw(DrawOp::StrokeArc(Arc {
                    center: at,
                    radii: Vec2::new(DOT_RADIUS, DOT_RADIUS),
                    start_angle: 0.0,
                    sweep_angle: TAU,
                    x_rotation: 0.0,
                }));
            }
        }
        if options.line && !path.elements().is_empty() {
            s.draw(DrawOp::StrokePath(path));
        }
        drawn
    })
}

/// What a render cycle drew and which samples it had to leave out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Grid lines drawn, both directions.
    pub grid_lines: usize,
    /// Samples produced for the current expression.
    pub samples: usize,
    /// Points that made it into the drawn geometry.
    pub points_drawn: usize,
    /// The grid hit [`MAX_GRID_LINES`](crate::grid::MAX_GRID_LINES) and
    /// does not reach the visible edge.
    pub grid_truncated: bool,
    /// Skipped or undrawable samples.
    pub issues: Vec<SampleError>,
}

impl RenderReport {
    /// Returns `true` if the full grid and every sample were drawn.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.grid_truncated && self.issues.is_empty()
    }
}

/// Fixed sequence of drawing passes run on every trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderCycle {
    /// Grid and axis appearance.
    pub grid: GridRenderer,
    /// Curve appearance.
    pub draw_options: DrawOptions,
    /// Samples per visible width.
    pub sample_count: usize,
}

impl Default for RenderCycle {
    fn default() -> Self {
        Self {
            grid: GridRenderer::default(),
            draw_options: DrawOptions::default(),
            sample_count: 100,
        }
    }
}

impl RenderCycle {
    /// Redraws everything from the current viewport.
    ///
    /// Clears the surface, then under "scale, then translate by the offset"
    /// draws the grid (one line per view-scale cell), the axes, and the
    /// sampled `expression`. The surface's drawing state is left as it was
    /// found.
    pub fn run<S, E>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        evaluator: &E,
        expression: &str,
    ) -> RenderReport
    where
        S: Surface + ?Sized,
        E: Evaluator + ?Sized,
    {
        let vs = viewport.view_scale();
        let scale = viewport.scale();

        surface.clear();
        let report = surface.with_saved(|s| {
            s.state(StateOp::Scale(Vec2::new(scale, scale)));
            s.state(StateOp::Translate(viewport.offset()));

            let step = Vec2::new(vs.width, vs.height);
            let grid_lines = self.grid.draw_grid(s, viewport, step);
            self.grid.draw_axes(s, viewport);

            let Samples { points, issues } =
                sample_visible(evaluator, expression, viewport, self.sample_count);
            let points_drawn = draw_points(s, viewport, &points, &self.draw_options);
            RenderReport {
                grid_lines,
                grid_truncated: grid_truncated(viewport, step),
                samples: points.len(),
                points_drawn,
                issues,
            }
        });

        tracing::trace!(
            grid_lines = report.grid_lines,
            grid_truncated = report.grid_truncated,
            samples = report.samples,
            points_drawn = report.points_drawn,
            "render cycle"
        );
        if let Some(first) = report.issues.first() {
            tracing::warn!(
                expression,
                count = report.issues.len(),
                "{} sample(s) not drawn; first: {first}",
                report.issues.len()
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{PathEl, Size};
    use plotter_imaging::SurfaceOp;
    use plotter_imaging_ref::RecordingSurface;
    use plotter_view::ViewScale;

    use super::*;
    use crate::eval::EvalError;

    fn view_500() -> Viewport {
        Viewport::new(Size::new(500.0, 500.0))
    }

    fn identity(_: &str, x: f64) -> Result<f64, EvalError> {
        Ok(x)
    }

    #[test]
    fn line_breaks_at_non_finite_points() {
        let vp = view_500();
        let mut s = RecordingSurface::new(Size::new(500.0, 500.0));
        let pts = [
            Point::new(-1.0, 1.0),
            Point::new(0.0, 0.0),
            Point::new(0.5, f64::NAN),
            Point::new(1.0, 1.0),
            Point::new(2.0, 4.0),
        ];
        let n = draw_points(&mut s, &vp, &pts, &DrawOptions::default());
        assert_eq!(n, 4);
        let (path, state) = s.stroked_paths().next().unwrap();
        let moves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(path.elements().len(), 4);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(-50.0, -10.0)));
        assert_eq!(state.stroke_color, Color::from_rgb8(0, 0, 0xff));
        assert_eq!(s.current_state().save_depth, 0);
    }

    #[test]
    fn dots_only() {
        let vp = view_500();
        let mut s = RecordingSurface::new(Size::new(500.0, 500.0));
        let options = DrawOptions {
            dots: true,
            line: false,
            ..DrawOptions::default()
        };
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, f64::INFINITY), Point::new(2.0, 1.0)];
        assert_eq!(draw_points(&mut s, &vp, &pts, &options), 2);
        let arcs: Vec<_> = s
            .draws()
            .filter_map(|(op, _)| match op {
                DrawOp::StrokeArc(a) => Some(*a),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[1].center, Point::new(100.0, -10.0));
        assert_eq!(arcs[1].radii, Vec2::new(1.0, 1.0));
        assert_eq!(arcs[1].sweep_angle, TAU);
        assert_eq!(s.stroked_paths().count(), 0);
    }

    #[test]
    fn cycle_order_and_transform() {
        let vp = view_500();
        let mut s = RecordingSurface::new(Size::new(500.0, 500.0));
        let report = RenderCycle::default().run(&mut s, &vp, &identity, "x");
        let ops = s.ops();
        assert!(matches!(ops[0], SurfaceOp::Draw(DrawOp::ClearRect(_))));
        assert_eq!(ops[1], SurfaceOp::State(StateOp::Save));
        assert_eq!(ops[2], SurfaceOp::State(StateOp::Scale(Vec2::new(1.0, 1.0))));
        assert_eq!(
            ops[3],
            SurfaceOp::State(StateOp::Translate(Vec2::new(250.0, 250.0)))
        );
        assert_eq!(ops.last(), Some(&SurfaceOp::State(StateOp::Restore)));
        assert_eq!(s.current_state().save_depth, 0);
        assert_eq!(s.unbalanced_restores(), 0);

        assert_eq!(report.grid_lines, 24);
        assert_eq!(report.samples, 171);
        assert_eq!(report.points_drawn, 171);
        assert!(!report.grid_truncated);
        assert!(report.is_clean());
    }

    #[test]
    fn cycle_reports_a_cut_short_grid() {
        let mut vp = view_500();
        vp.set_view_scale(ViewScale {
            width: 0.1,
            ..ViewScale::default()
        });
        let mut s = RecordingSurface::new(Size::new(500.0, 500.0));
        let report = RenderCycle::default().run(&mut s, &vp, &identity, "x");
        assert!(report.grid_truncated);
        assert!(!report.is_clean());
        assert_eq!(s.current_state().save_depth, 0);
    }

    #[test]
    fn cycle_reports_bad_samples() {
        let vp = view_500();
        let mut s = RecordingSurface::new(Size::new(500.0, 500.0));
        let eval = |_: &str, x: f64| {
            if x > 5.0 {
                Err(EvalError::domain(x, "out of range"))
            } else if x.abs() < 0.05 {
                Ok(f64::NAN)
            } else {
                Ok(1.0 / x)
            }
        };
        let report = RenderCycle::default().run(&mut s, &vp, &eval, "1/x");
        assert_eq!(s.current_state().save_depth, 0);
        assert!(!report.is_clean());
        assert!(report.samples < 171);
        assert!(report.points_drawn < report.samples);
        assert!(
            report
                .issues
                .iter()
                .any(|e| matches!(e, SampleError::Evaluation { .. }))
        );
    }
}
