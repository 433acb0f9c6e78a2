// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotter Imaging: the drawing-surface capability used by the render cycle.
//!
//! This crate defines a small, Canvas‑2D shaped drawing IR and the
//! [`Surface`] trait for backends that consume it. It sits between the
//! plot widget (grid, axes, sampled curves) and a concrete drawing target
//! such as a browser canvas or a recording surface used in tests.
//!
//! # Core concepts
//!
//! - **State operations** ([`StateOp`]): save/restore, scale/translate, and
//!   the stroke color, fill color, line width, and font used by later draws.
//! - **Draw operations** ([`DrawOp`]): clear a rectangle, stroke a path or
//!   an arc, and fill text.
//! - **Surfaces** ([`Surface`]): accept state and draw ops, report their
//!   pixel size, and measure text.
//! - **Helpers** ([`SurfaceExt`]): scoped save/restore, single-segment
//!   strokes and text fills.
//!
//! Geometry uses `kurbo` types and colors use `peniko::Color`.
//!
//! # Example
//!
//! ```ignore
//! # use plotter_imaging::*;
//! # use kurbo::{BezPath, Point};
//! # struct MySurface { /* implements Surface */ }
//! let mut surface = MySurface { /* ... */ };
//!
//! surface.with_saved(|s| {
//!     s.state(StateOp::SetStrokeColor(peniko::Color::BLACK));
//!     s.state(StateOp::SetLineWidth(0.5));
//!     s.stroke_line(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! });
//! ```

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Size, Vec2};
pub use peniko::Color;

/// Affine transform type used by the imaging IR.
pub type Affine = kurbo::Affine;

/// Font used when filling and measuring text.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font family name, e.g. `Arial`.
    pub family: String,
    /// Size in points.
    pub size_pt: f64,
}

impl Font {
    /// Creates a font description.
    pub fn new(family: impl Into<String>, size_pt: f64) -> Self {
        Self {
            family: family.into(),
            size_pt,
        }
    }

    /// CSS shorthand, e.g. `10pt Arial`.
    pub fn to_css(&self) -> String {
        format!("{}pt {}", self.size_pt, self.family)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Arial", 10.0)
    }
}

/// State operations that mutate the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a copy of the current state (transform, colors, width, font).
    ///
    /// Must be matched by a later [`StateOp::Restore`].
    Save,
    /// Pop the most recently saved state.
    Restore,
    /// Post-multiply the transform by a non-uniform scale.
    Scale(Vec2),
    /// Post-multiply the transform by a translation.
    Translate(Vec2),
    /// Set the color used by stroke draws.
    SetStrokeColor(Color),
    /// Set the color used by text fills.
    SetFillColor(Color),
    /// Set the stroke width, in local units.
    SetLineWidth(f64),
    /// Set the font used by text fills and measurement.
    SetFont(Font),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Clear the rectangle to transparent.
    ClearRect(Rect),
    /// Stroke a path with the current stroke color and width.
    StrokePath(BezPath),
    /// Stroke an elliptical arc with the current stroke color and width.
    StrokeArc(kurbo::Arc),
    /// Fill text with its alphabetic baseline starting at `origin`.
    FillText {
        /// Text to draw.
        text: String,
        /// Baseline start point in local coordinates.
        origin: Point,
    },
}

/// Either kind of surface operation, for logs and replays.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// A state operation.
    State(StateOp),
    /// A draw operation.
    Draw(DrawOp),
}

/// Drawing target consumed by the render cycle.
///
/// Implementations apply state ops in order and draw with whatever state is
/// current at the time of each draw op.
pub trait Surface {
    /// Pixel size of the surface.
    fn size(&self) -> Size;

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Advance width of `text` in the current font, in local units.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Apply a recorded operation.
    fn apply(&mut self, op: SurfaceOp) {
        match op {
            SurfaceOp::State(op) => self.state(op),
            SurfaceOp::Draw(op) => self.draw(op),
        }
    }
}

/// Looks up a drawing surface by key, e.g. a CSS selector or a window id.
pub trait SurfaceResolver {
    /// Surface type produced by this resolver.
    type Surface: Surface;

    /// Resolve `key` to a surface, or `None` if nothing usable matches.
    fn resolve(&mut self, key: &str) -> Option<Self::Surface>;
}

/// Convenience helpers for [`Surface`].
pub trait SurfaceExt: Surface {
    /// Run `f` between a [`StateOp::Save`] and its matching [`StateOp::Restore`].
    fn with_saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.state(StateOp::Save);
        let out = f(self);
        self.state(StateOp::Restore);
        out
    }

    /// Stroke a single line segment.
    fn stroke_line(&mut self, from: Point, to: Point) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.draw(DrawOp::StrokePath(path));
    }

    /// Fill `text` with its baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point) {
        self.draw(DrawOp::FillText {
            text: text.into(),
            origin,
        });
    }

    /// Clear the whole surface.
    fn clear(&mut self) {
        let size = self.size();
        self.draw(DrawOp::ClearRect(Rect::from_origin_size(Point::ZERO, size)));
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}
