// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotter_event_state --heading-base-level=0

//! Plotter Event State: interaction state managers for a plot widget.
//!
//! This crate provides small state machines for the interactions that need
//! state carried across several input events:
//!
//! - [`drag`]: Track a pointer drag and report movement deltas
//! - [`nudge`]: Ramp keyboard nudge velocity while a direction key is held
//! - [`focus`]: Remember whether the widget owns keyboard input
//!
//! ## Design Philosophy
//!
//! Each manager tracks just enough state to compute the next transition and
//! knows nothing about viewports, surfaces, or the host's event system. The
//! `plotter` crate wires them into its interaction controller.
//!
//! ## Usage Patterns
//!
//! ### Drag Operations
//!
//! ```rust
//! use kurbo::Point;
//! use plotter_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 10.0));
//!
//! let delta = drag.update(Point::new(15.0, 12.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 2.0));
//! ```
//!
//! ### Nudge Ramp
//!
//! ```rust
//! use plotter_event_state::nudge::NudgeRamp;
//!
//! let mut ramp = NudgeRamp::new(3.0);
//! assert_eq!(ramp.step(), 1.0);
//! assert_eq!(ramp.step(), 2.0);
//! assert_eq!(ramp.step(), 3.0);
//! assert_eq!(ramp.step(), 3.0);
//! ramp.reset();
//! assert_eq!(ramp.velocity(), 0.0);
//! ```
//!
//! ### Focus
//!
//! ```rust
//! use plotter_event_state::focus::FocusFlag;
//!
//! let mut focus = FocusFlag::default();
//! focus.pointer_down_observed(true);
//! assert!(focus.has_focus());
//! focus.pointer_down_observed(false);
//! assert!(!focus.has_focus());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod focus;
pub mod nudge;
