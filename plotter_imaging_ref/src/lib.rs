// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotter_imaging_ref --heading-base-level=0

//! Plotter Imaging Recording Surface.
//!
//! This crate provides a small, stateful implementation of [`Surface`] for
//! **op recording and state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - Text measurement is a fixed per-character advance scaled by font size.
//! - It is intended for tests, benches, and headless runs that want to
//!   assert on emitted ops and the drawing state at the time each op is
//!   applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Size};
use plotter_imaging::{Affine, Color, DrawOp, Font, StateOp, Surface, SurfaceOp};

/// Snapshot of the current drawing state inside the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Current stroke color.
    pub stroke_color: Color,
    /// Current fill color.
    pub fill_color: Color,
    /// Current stroke width.
    pub line_width: f64,
    /// Current font.
    pub font: Font,
    /// Number of unmatched [`StateOp::Save`] ops.
    pub save_depth: u32,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            font: Font::new("sans-serif", 10.0),
            save_depth: 0,
        }
    }
}

/// Event recorded by the surface.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Recording implementation of [`Surface`].
///
/// This surface:
/// - Tracks the current drawing state and a save/restore stack,
/// - Records [`Event`]s as state and draw operations are applied,
/// - Measures text as `chars * advance * size_pt / 10`.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    char_advance: f64,
    /// Log of events in the order they were applied.
    events: Vec<Event>,
    state: StateSnapshot,
    saved: Vec<StateSnapshot>,
    unbalanced_restores: u32,
}

impl RecordingSurface {
    /// Creates a surface of the given pixel size.
    ///
    /// Text advances default to 6 units per character at 10pt.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            char_advance: 6.0,
            events: Vec::new(),
            state: StateSnapshot::default(),
            saved: Vec::new(),
            unbalanced_restores: 0,
        }
    }

    /// Sets the per-character text advance at 10pt.
    #[must_use]
    pub fn with_char_advance(mut self, advance: f64) -> Self {
        self.char_advance = advance;
        self
    }

    /// Changes the reported pixel size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the recorded operations without state snapshots.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.events
            .iter()
            .map(|e| match e {
                Event::State { op, .. } => SurfaceOp::State(op.clone()),
                Event::Draw { op, .. } => SurfaceOp::Draw(op.clone()),
            })
            .collect()
    }

    /// Returns the draw events only.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &StateSnapshot)> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Returns every stroked path with the state it was stroked in.
    pub fn stroked_paths(&self) -> impl Iterator<Item = (&BezPath, &StateSnapshot)> + '_ {
        self.draws().filter_map(|(op, state)| match op {
            DrawOp::StrokePath(path) => Some((path, state)),
            _ => None,
        })
    }

    /// Returns every filled text run with its origin and state.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, &StateSnapshot)> + '_ {
        self.draws().filter_map(|(op, state)| match op {
            DrawOp::FillText { text, origin } => Some((text.as_str(), *origin, state)),
            _ => None,
        })
    }

    /// Current drawing state.
    pub fn current_state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Number of [`StateOp::Restore`] ops that had no matching save.
    pub fn unbalanced_restores(&self) -> u32 {
        self.unbalanced_restores
    }

    /// Clears all recorded events but keeps the drawing state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn depth(&self) -> u32 {
        u32::try_from(self.saved.len()).unwrap_or(u32::MAX)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&mut self, op: StateOp) {
        match &op {
            StateOp::Save => {
                self.saved.push(self.state.clone());
                self.state.save_depth = self.depth();
            }
            StateOp::Restore => match self.saved.pop() {
                Some(prev) => {
                    self.state = prev;
                    self.state.save_depth = self.depth();
                }
                None => self.unbalanced_restores += 1,
            },
            StateOp::Scale(s) => {
                self.state.transform = self.state.transform * Affine::scale_non_uniform(s.x, s.y);
            }
            StateOp::Translate(t) => {
                self.state.transform = self.state.transform * Affine::translate(*t);
            }
            StateOp::SetStrokeColor(c) => self.state.stroke_color = *c,
            StateOp::SetFillColor(c) => self.state.fill_color = *c,
            StateOp::SetLineWidth(w) => self.state.line_width = *w,
            StateOp::SetFont(font) => self.state.font = font.clone(),
        }

        self.events.push(Event::State {
            op,
            state: self.state.clone(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.events.push(Event::Draw {
            op,
            state: self.state.clone(),
        });
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let chars = text.chars().count() as f64;
        chars * self.char_advance * self.state.font.size_pt / 10.0
    }
}
