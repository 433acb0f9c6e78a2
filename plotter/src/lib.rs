// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotter --heading-base-level=0

//! Plotter: an interactive graph of `y = f(x)` on a 2D drawing surface.
//!
//! The widget ties four pieces together:
//!
//! - A [`Viewport`] (from `plotter_view`) mapping surface pixels to plotted
//!   coordinates, mutated by panning, zooming and keyboard nudges.
//! - An [`InteractionController`] turning pointer, wheel and key events into
//!   viewport (or selection) changes and deciding when to redraw.
//! - A grid renderer ([`grid`]) deriving grid lines, labels and axes from the
//!   viewport alone.
//! - A [`sampler`] evaluating the plotted expression over the visible domain.
//!
//! [`Plotter`] owns all of them plus a [`Surface`] to draw on and an
//! [`Evaluator`] for the expression. Every redraw runs the same
//! [`RenderCycle`]: clear, apply the viewport transform, grid, axes, curve.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use plotter::{EvalError, InputEvent, Plotter, PlotterConfig};
//! use plotter_imaging_ref::RecordingSurface;
//!
//! let square = |_: &str, x: f64| -> Result<f64, EvalError> { Ok(x * x) };
//! let config = PlotterConfig {
//!     generatrix: "x*x".into(),
//!     ..PlotterConfig::default()
//! };
//! let mut plot = Plotter::new(RecordingSurface::new(Size::new(500.0, 500.0)), square, config)?;
//! assert_eq!(plot.viewport().offset(), Vec2::new(250.0, 250.0));
//!
//! // Drag right by 20 pixels: the view pans and redraws.
//! plot.handle_event(InputEvent::PointerDown(Point::new(100.0, 100.0)));
//! let response = plot.handle_event(InputEvent::PointerMove(Point::new(120.0, 100.0)));
//! assert!(response.render);
//! assert_eq!(plot.viewport().offset(), Vec2::new(270.0, 250.0));
//! assert_eq!(plot.render_count(), 1);
//! # Ok::<(), plotter::PlotterError>(())
//! ```
//!
//! ## Errors and diagnostics
//!
//! Construction fails with [`PlotterError`] when the surface cannot be
//! resolved or the configuration is invalid. Rendering never fails: samples
//! the evaluator rejects, or that come back non-finite, are left out of the
//! drawn curve and listed in the [`RenderReport`]. Diagnostics are emitted
//! through `tracing`; installing a subscriber is up to the host.
//!
//! [`Surface`]: plotter_imaging::Surface
//! [`Viewport`]: plotter_view::Viewport

mod config;
mod controller;
mod error;
mod eval;
pub mod grid;
mod plotter;
mod render;
pub mod sampler;

pub use config::{OriginConfig, PlotterConfig, ViewScaleConfig};
pub use controller::{
    CursorIcon, Direction, InputEvent, InteractionController, InteractionState, KeyCode, Nudge,
    Response,
};
pub use error::{ConfigError, PlotterError, SampleError};
pub use eval::{EvalError, Evaluator};
pub use grid::{GridAxis, GridLine, GridRenderer};
pub use plotter::{Plotter, SurfaceHandle};
pub use render::{DOT_RADIUS, DrawOptions, RenderCycle, RenderReport, draw_points};
pub use sampler::{SampleDomain, Samples};

pub use plotter_view::{ViewScale, Viewport, client_to_surface, round_half};
