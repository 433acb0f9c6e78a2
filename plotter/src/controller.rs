// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input handling: pointer drags pan, the wheel zooms, arrow keys nudge.
//!
//! [`InteractionController`] owns the transient interaction state (the drag
//! session, the nudge ramps, the focus flag and the cursor) and applies
//! events to a [`Viewport`] or to the current selection. It never draws;
//! every [`Response`] says whether the caller should run a render cycle and
//! notify drag observers.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use kurbo::{Point, Vec2};
use plotter_event_state::drag::DragState;
use plotter_event_state::focus::FocusFlag;
use plotter_event_state::nudge::NudgeRamp;
use plotter_view::Viewport;

/// Keys the controller recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Any other key, by legacy DOM key code.
    Other(u32),
}

impl KeyCode {
    /// Maps a legacy DOM `keyCode` (37 to 40 are the arrows).
    #[must_use]
    pub fn from_dom_key_code(code: u32) -> Self {
        match code {
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            other => Self::Other(other),
        }
    }

    /// Maps a DOM `KeyboardEvent.key` name such as `"ArrowLeft"`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => Self::Other(0),
        }
    }

    /// Nudge direction for arrow keys.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ArrowLeft => Some(Direction::Left),
            Self::ArrowRight => Some(Direction::Right),
            Self::ArrowUp => Some(Direction::Up),
            Self::ArrowDown => Some(Direction::Down),
            Self::Other(_) => None,
        }
    }
}

/// Direction of a keyboard nudge, in surface orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller `x`.
    Left,
    /// Towards larger `x`.
    Right,
    /// Towards smaller surface `y`.
    Up,
    /// Towards larger surface `y`.
    Down,
}

impl Direction {
    /// Unit vector for this direction.
    #[must_use]
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Raw input delivered to the controller.
///
/// Pointer positions are in surface pixels; see
/// [`client_to_surface`](plotter_view::client_to_surface) for converting
/// page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button went down over the surface.
    PointerDown(Point),
    /// The pointer moved over the surface.
    PointerMove(Point),
    /// A button was released.
    PointerUp(Point),
    /// The wheel turned; positive `delta_y` scrolls down.
    Wheel {
        /// Vertical scroll amount.
        delta_y: f64,
    },
    /// A key went down, possibly as auto-repeat.
    KeyDown(KeyCode),
    /// A key was released.
    KeyUp(KeyCode),
}

/// Coarse interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    /// Nothing in progress.
    Idle,
    /// A pointer drag is panning the view.
    Dragging,
    /// A direction key is held down.
    KeyHeld(Direction),
}

/// Cursor the host should show over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorIcon {
    /// The platform default cursor.
    #[default]
    Default,
    /// Four-way move cursor, shown while dragging.
    AllScroll,
}

impl CursorIcon {
    /// CSS `cursor` value.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::AllScroll => "all-scroll",
        }
    }
}

/// What the caller should do after an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// Run a render cycle.
    pub render: bool,
    /// Notify drag observers: the view or the selection moved.
    pub drag_observed: bool,
    /// Cursor to show.
    pub cursor: CursorIcon,
}

/// An externally owned entity that keyboard nudges can move.
pub trait Nudge {
    /// Current position.
    fn position(&self) -> Point;
    /// Moves the entity.
    fn set_position(&mut self, position: Point);
}

/// Applies input events to a viewport.
pub struct InteractionController {
    drag: DragState,
    nudge_x: NudgeRamp,
    nudge_y: NudgeRamp,
    focus: FocusFlag,
    held: Option<Direction>,
    cursor: CursorIcon,
    zoom_step: f64,
    selection: Option<Weak<RefCell<dyn Nudge>>>,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("drag", &self.drag)
            .field("nudge_x", &self.nudge_x)
            .field("nudge_y", &self.nudge_y)
            .field("focus", &self.focus)
            .field("held", &self.held)
            .field("cursor", &self.cursor)
            .field("zoom_step", &self.zoom_step)
            .field("has_selection", &self.has_selection())
            .finish_non_exhaustive()
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(20.0, 20.0, 0.1)
    }
}

impl InteractionController {
    /// Creates an idle, unfocused controller.
    ///
    /// `max_nudge_x`/`max_nudge_y` cap the keyboard ramps; `zoom_step` is
    /// the scale change per wheel tick.
    #[must_use]
    pub fn new(max_nudge_x: f64, max_nudge_y: f64, zoom_step: f64) -> Self {
        Self {
            drag: DragState::default(),
            nudge_x: NudgeRamp::new(max_nudge_x),
            nudge_y: NudgeRamp::new(max_nudge_y),
            focus: FocusFlag::default(),
            held: None,
            cursor: CursorIcon::Default,
            zoom_step,
            selection: None,
        }
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        if self.drag.is_dragging() {
            InteractionState::Dragging
        } else if let Some(dir) = self.held {
            InteractionState::KeyHeld(dir)
        } else {
            InteractionState::Idle
        }
    }

    /// Cursor to show over the surface.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Whether keyboard input is routed to this controller.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focus.has_focus()
    }

    /// Current horizontal nudge velocity.
    #[must_use]
    pub fn nudge_velocity_x(&self) -> f64 {
        self.nudge_x.velocity()
    }

    /// Current vertical nudge velocity.
    #[must_use]
    pub fn nudge_velocity_y(&self) -> f64 {
        self.nudge_y.velocity()
    }

    /// Records a pointer-down anywhere in the host; focus follows whether it
    /// hit this surface. Returns `true` if focus changed.
    pub fn pointer_down_observed(&mut self, on_surface: bool) -> bool {
        self.focus.pointer_down_observed(on_surface)
    }

    /// Routes keyboard nudges to `selection` instead of the viewport.
    ///
    /// Only a weak reference is kept; the entity stays owned by the caller.
    pub fn set_selection<N>(&mut self, selection: &Rc<RefCell<N>>)
    where
        N: Nudge + 'static,
    {
        let shared: Rc<RefCell<dyn Nudge>> = selection.clone();
        self.selection = Some(Rc::downgrade(&shared));
    }

    /// Routes keyboard nudges back to the viewport.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Whether a live selection is attached.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Applies `event` to `viewport` or the selection.
    pub fn handle(&mut self, event: InputEvent, viewport: &mut Viewport) -> Response {
        match event {
            InputEvent::PointerDown(pos) => {
                self.focus.set(true);
                self.drag.start(pos);
                self.cursor = CursorIcon::AllScroll;
                tracing::debug!(
                    screen = ?pos,
                    world = ?viewport.screen_to_world(pos),
                    offset = ?viewport.offset(),
                    scale = viewport.scale(),
                    "pointer down"
                );
                self.response(false, false)
            }
            InputEvent::PointerMove(pos) => match self.drag.update(pos) {
                Some(delta) => {
                    self.cursor = CursorIcon::AllScroll;
                    viewport.pan(delta);
                    self.response(true, true)
                }
                None => {
                    self.cursor = CursorIcon::Default;
                    self.response(false, false)
                }
            },
            InputEvent::PointerUp(_) => {
                self.drag.end();
                self.cursor = CursorIcon::Default;
                self.response(false, false)
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y == 0.0 || delta_y.is_nan() {
                    return self.response(false, false);
                }
                let step = if delta_y > 0.0 {
                    self.zoom_step
                } else {
                    -self.zoom_step
                };
                if !viewport.zoom_by(step) {
                    tracing::trace!(scale = viewport.scale(), "zoom clamped at bound");
                }
                self.response(true, false)
            }
            InputEvent::KeyDown(key) => {
                if !self.focus.has_focus() {
                    return self.response(false, false);
                }
                match key.direction() {
                    Some(dir) => self.nudge(dir, viewport),
                    None => self.response(false, false),
                }
            }
            InputEvent::KeyUp(_) => {
                self.held = None;
                if self.focus.has_focus() {
                    self.nudge_x.reset();
                    self.nudge_y.reset();
                }
                self.response(false, false)
            }
        }
    }

    fn nudge(&mut self, dir: Direction, viewport: &mut Viewport) -> Response {
        self.held = Some(dir);
        let speed = if dir.is_horizontal() {
            self.nudge_x.step()
        } else {
            self.nudge_y.step()
        };
        let delta = dir.unit() * speed;

        match self.live_selection() {
            Some(selected) => {
                let Ok(mut entity) = selected.try_borrow_mut() else {
                    tracing::warn!("selection is borrowed elsewhere, nudge skipped");
                    return self.response(false, false);
                };
                let to = entity.position() + delta;
                entity.set_position(to);
            }
            None => viewport.nudge(delta),
        }
        self.response(true, true)
    }

    fn live_selection(&mut self) -> Option<Rc<RefCell<dyn Nudge>>> {
        let weak = self.selection.as_ref()?;
        match weak.upgrade() {
            Some(rc) => Some(rc),
            None => {
                tracing::debug!("selection was dropped, nudging the view instead");
                self.selection = None;
                None
            }
        }
    }

    fn response(&self, render: bool, drag_observed: bool) -> Response {
        Response {
            render,
            drag_observed,
            cursor: self.cursor,
        }
    }
}
