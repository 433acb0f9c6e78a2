// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotter_view --heading-base-level=0

//! Plotter View: the pan/zoom viewport behind an interactive function graph.
//!
//! This crate provides a small, headless model of the view over a plotted
//! function. It focuses on:
//! - Viewport state: a pixel offset of the world origin and a uniform zoom
//!   factor bounded by `[min_scale, max_scale]`.
//! - Coordinate conversion between surface pixels and world coordinates.
//! - The grid-cell ratio ([`ViewScale`]) relating pixels to plotted units.
//! - Mapping pointer client coordinates onto the drawing surface.
//!
//! It does **not** draw anything or interpret input events. Callers are
//! expected to:
//! - Feed pointer drags into [`Viewport::pan`] and wheel ticks into
//!   [`Viewport::zoom_by`].
//! - Use [`Viewport::layer_transform`] as the drawing transform and
//!   [`Viewport::plot_to_layer`] to place sampled points.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use plotter_view::Viewport;
//!
//! // A 500x500 surface: the world origin starts in the middle.
//! let mut view = Viewport::new(Size::new(500.0, 500.0));
//! assert_eq!(view.offset(), Vec2::new(250.0, 250.0));
//!
//! // Surface pixels map back onto world coordinates.
//! let world = view.screen_to_world(Point::new(300.0, 250.0));
//! assert_eq!(world, Point::new(50.0, 0.0));
//!
//! // Zoom is a fixed additive step and is clamped to the scale bounds.
//! view.zoom_by(0.1);
//! assert!((view.scale() - 1.1).abs() < 1e-12);
//! ```
//!
//! ## Design notes
//!
//! - Zoom never changes the offset; it scales about the world origin rather
//!   than the pointer location.
//! - Panning divides the pixel delta by the current scale, so a drag moves
//!   the picture at the same on-screen speed at every zoom level.
//!
//! This crate is `no_std`.

#![no_std]

mod scale;
mod viewport;

pub use scale::ViewScale;
pub use viewport::{Viewport, ViewportDebugInfo, client_to_surface, round_half};
