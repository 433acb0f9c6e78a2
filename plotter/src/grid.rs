// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid lines, grid labels and axes.
//!
//! Everything here is derived from the [`Viewport`] on demand. Nothing is
//! cached between render cycles.
//!
//! All coordinates are layer coordinates, i.e. they are meant to be drawn
//! under [`Viewport::layer_transform`].

use kurbo::{Point, Vec2};
use plotter_imaging::{Color, Font, StateOp, Surface, SurfaceExt};
use plotter_view::Viewport;

/// Upper bound on the number of lines produced per direction.
pub const MAX_GRID_LINES: usize = 4096;

/// Direction of a grid line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridAxis {
    /// A line of constant `x`, labelled with a plotted `x` value.
    Vertical,
    /// A line of constant `y`, labelled with a plotted `y` value.
    Horizontal,
}

/// One grid line and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLine {
    /// Direction of the line.
    pub axis: GridAxis,
    /// Grid-cell counter; consecutive lines differ by exactly one.
    ///
    /// Saturates at the `i64` bounds for offsets beyond them.
    pub index: i64,
    /// Layer coordinate of the line across its direction (`x` for vertical
    /// lines, `y` for horizontal ones), including the half-pixel shift.
    pub position: f64,
    /// Formatted plotted value.
    pub label: String,
}

/// Layer positions of evenly spaced lines covering `visible + step` pixels
/// past an offset of `offset`, paired with their grid-cell numbers.
///
/// Cell numbers stay in `f64` so that offsets far outside the `i64` range
/// still produce lines instead of overflowing.
fn line_positions(offset: f64, step: f64, visible: f64) -> impl Iterator<Item = (f64, f64)> {
    let usable = usable(offset, step, visible);
    let first = offset.rem_euclid(step) - step + 0.5;
    let limit = visible + step;
    let first_cell = -((offset + step) / step).floor();
    (0..MAX_GRID_LINES)
        .take_while(move |_| usable)
        .map(move |n| (n, first + n as f64 * step))
        .take_while(move |&(_, i)| i < limit)
        .map(move |(n, i)| (first_cell + n as f64, i - offset))
}

fn usable(offset: f64, step: f64, visible: f64) -> bool {
    step.is_finite() && step > 0.0 && offset.is_finite() && visible.is_finite()
}

/// Number of lines needed to cover the visible extent, before the cap.
fn lines_needed(offset: f64, step: f64, visible: f64) -> f64 {
    if !usable(offset, step, visible) {
        return 0.0;
    }
    let first = offset.rem_euclid(step) - step + 0.5;
    ((visible + step - first) / step).ceil().max(0.0)
}

/// Returns `true` if either direction needs more than [`MAX_GRID_LINES`]
/// lines, so [`grid_lines`] stops short of the visible edge.
#[must_use]
pub fn grid_truncated(viewport: &Viewport, step: Vec2) -> bool {
    let offset = viewport.offset();
    let visible = viewport.visible_size();
    let cap = MAX_GRID_LINES as f64;
    lines_needed(offset.x, step.x, visible.width) > cap
        || lines_needed(offset.y, step.y, visible.height) > cap
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate; the label is formatted from the f64 cell."
)]
fn cell_index(cell: f64) -> i64 {
    cell as i64
}

/// Derives the vertical and horizontal grid lines for `viewport`.
///
/// `step` is the pixel spacing between lines in each direction, normally the
/// view scale's cell size. Vertical labels are `index * v_width`; horizontal
/// labels are `-index * v_height` with one decimal, since plotted `y` grows
/// upwards.
#[must_use]
pub fn grid_lines(viewport: &Viewport, step: Vec2) -> Vec<GridLine> {
    let offset = viewport.offset();
    let visible = viewport.visible_size();
    let vs = viewport.view_scale();

    let vertical = line_positions(offset.x, step.x, visible.width).map(|(cell, position)| {
        GridLine {
            axis: GridAxis::Vertical,
            index: cell_index(cell),
            position,
            label: format!("{}", cell * vs.v_width),
        }
    });
    let horizontal = line_positions(offset.y, step.y, visible.height).map(|(cell, position)| {
        // `+ 0.0` turns a negative zero into a positive one.
        let value = -cell * vs.v_height + 0.0;
        GridLine {
            axis: GridAxis::Horizontal,
            index: cell_index(cell),
            position,
            label: format!("{value:.1}"),
        }
    });
    vertical.chain(horizontal).collect()
}

/// Appearance of grid lines and their labels.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Grid line color.
    pub line_color: Color,
    /// Grid line width in layer units.
    pub line_width: f64,
    /// Label font.
    pub font: Font,
    /// Label color.
    pub label_color: Color,
    /// Gap between a label and the axis it is attached to.
    pub label_padding: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            // CSS `lightgray`.
            line_color: Color::from_rgb8(0xd3, 0xd3, 0xd3),
            line_width: 0.5,
            font: Font::new("Arial", 10.0),
            label_color: Color::BLACK,
            label_padding: 15.0,
        }
    }
}

/// Appearance of the two axis lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisStyle {
    /// Axis color.
    pub color: Color,
    /// Axis width in layer units.
    pub line_width: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 0.5,
        }
    }
}

/// Issues grid and axis draw calls for a viewport.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridRenderer {
    /// Grid line and label appearance.
    pub grid: GridStyle,
    /// Axis appearance.
    pub axes: AxisStyle,
}

impl GridRenderer {
    /// Draws the grid lines and labels of [`grid_lines`].
    ///
    /// Vertical lines span the visible height and carry their label just
    /// below the horizontal axis. Horizontal lines span the visible width
    /// and carry their label left of the vertical axis. Drawing state is
    /// restored afterwards. Returns the number of lines drawn.
    ///
    /// When the viewport needs more than [`MAX_GRID_LINES`] lines in a
    /// direction, the grid stops short of the visible edge and a warning is
    /// logged.
    pub fn draw_grid<S>(&self, surface: &mut S, viewport: &Viewport, step: Vec2) -> usize
    where
        S: Surface + ?Sized,
    {
        let lines = grid_lines(viewport, step);
        if grid_truncated(viewport, step) {
            tracing::warn!(
                ?step,
                limit = MAX_GRID_LINES,
                "grid cells too small for the visible area, grid cut short"
            );
        }
        let offset = viewport.offset();
        let visible = viewport.visible_size();
        let origin = viewport.origin();
        let pad = self.grid.label_padding;

        surface.with_saved(|s| {
            s.state(StateOp::SetStrokeColor(self.grid.line_color));
            s.state(StateOp::SetLineWidth(self.grid.line_width));
            s.state(StateOp::SetFont(self.grid.font.clone()));
            s.state(StateOp::SetFillColor(self.grid.label_color));

            for line in &lines {
                let (from, to, label_at) = match line.axis {
                    GridAxis::Vertical => {
                        let x = line.position;
                        let width = s.measure_text(&line.label);
                        (
                            Point::new(x, -offset.y),
                            Point::new(x, visible.height - offset.y),
                            Point::new(x - width / 2.0, origin.y + pad),
                        )
                    }
                    GridAxis::Horizontal => {
                        let y = line.position;
                        let width = s.measure_text(&line.label);
                        (
                            Point::new(-offset.x, y),
                            Point::new(visible.width - offset.x, y),
                            Point::new(origin.x - (width + pad), y - 20.0),
                        )
                    }
                };
                s.stroke_line(from, to);
                s.fill_text(&line.label, label_at);
            }
        });
        lines.len()
    }

    /// Draws the two axis lines through the viewport origin, spanning the
    /// visible extent.
    pub fn draw_axes<S>(&self, surface: &mut S, viewport: &Viewport)
    where
        S: Surface + ?Sized,
    {
        let offset = viewport.offset();
        let visible = viewport.visible_size();
        let scale = viewport.scale();
        let origin = viewport.origin();

        surface.with_saved(|s| {
            s.state(StateOp::SetStrokeColor(self.axes.color));
            s.state(StateOp::SetLineWidth(self.axes.line_width));
            let y = origin.y / scale;
            s.stroke_line(
                Point::new(-offset.x, y),
                Point::new(-offset.x + visible.width, y),
            );
            let x = origin.x / scale;
            s.stroke_line(
                Point::new(x, -offset.y),
                Point::new(x, -offset.y + visible.height),
            );
        });
    }
}

/// Strokes a full-width line at layer `y`, shifted half a pixel.
pub fn draw_horizontal_line<S>(surface: &mut S, viewport: &Viewport, y: f64)
where
    S: Surface + ?Sized,
{
    let offset = viewport.offset();
    let y = y + 0.5;
    surface.stroke_line(
        Point::new(-offset.x, y),
        Point::new(-offset.x + viewport.visible_size().width, y),
    );
}

/// Strokes a full-height line at layer `x`, shifted half a pixel.
pub fn draw_vertical_line<S>(surface: &mut S, viewport: &Viewport, x: f64)
where
    S: Surface + ?Sized,
{
    let offset = viewport.offset();
    let x = x + 0.5;
    surface.stroke_line(
        Point::new(x, -offset.y),
        Point::new(x, -offset.y + viewport.visible_size().height),
    );
}
