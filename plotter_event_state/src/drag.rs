// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag session: movement deltas between consecutive pointer positions.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on pointer-down with the surface position.
//! 2) On each pointer-move, call [`DragState::update`] to get the delta since the previous position.
//! 3) Call [`DragState::end`] on pointer-up.
//!
//! There is no drag threshold: a started session reports every movement.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use plotter_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert!(drag.is_dragging());
//!
//! let delta = drag.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//!
//! drag.end();
//! assert!(drag.update(Point::new(0.0, 0.0)).is_none());
//! ```

use kurbo::{Point, Vec2};

/// An in-progress pointer drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    active: bool,
    last_pos: Option<Point>,
}

impl DragState {
    /// Begin a drag at `pos`, replacing any session already in progress.
    pub fn start(&mut self, pos: Point) {
        self.active = true;
        self.last_pos = Some(pos);
    }

    /// Record a new pointer location and return the delta from the previous one.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// End the drag and forget its positions.
    pub fn end(&mut self) {
        self.active = false;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.active
    }
}
