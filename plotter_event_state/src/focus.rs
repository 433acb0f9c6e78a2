// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget focus flag.
//!
//! Keyboard events usually arrive from a page- or window-wide source, so a
//! widget must know whether it currently owns the keyboard. [`FocusFlag`]
//! answers that from pointer-down notifications: the host reports every
//! pointer-down it observes, along with whether it landed on this widget's
//! surface. Each widget instance owns its flag, so several widgets on one
//! page never interfere.

/// Whether the widget currently holds keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusFlag {
    focused: bool,
}

impl FocusFlag {
    /// Record a pointer-down observed anywhere in the host.
    ///
    /// Returns `true` if the focus state changed.
    pub fn pointer_down_observed(&mut self, on_surface: bool) -> bool {
        let changed = self.focused != on_surface;
        self.focused = on_surface;
        changed
    }

    /// Force the focus state, for hosts with their own focus management.
    pub fn set(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns `true` while the widget holds focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focused
    }
}
