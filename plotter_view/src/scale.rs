// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Ratio between surface pixels and plotted units, expressed per grid cell.
///
/// One grid cell is `width` × `height` pixels and represents `v_width` ×
/// `v_height` plotted units. All four components are strictly positive for a
/// usable view; see [`ViewScale::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewScale {
    /// Horizontal size of a grid cell in pixels.
    pub width: f64,
    /// Plotted units covered by one cell horizontally.
    pub v_width: f64,
    /// Vertical size of a grid cell in pixels.
    pub height: f64,
    /// Plotted units covered by one cell vertically.
    pub v_height: f64,
}

impl ViewScale {
    /// 50px cells; one unit per cell across, five units per cell up.
    pub const DEFAULT: Self = Self {
        width: 50.0,
        v_width: 1.0,
        height: 50.0,
        v_height: 5.0,
    };

    /// Creates a view scale from its four components.
    #[must_use]
    pub const fn new(width: f64, v_width: f64, height: f64, v_height: f64) -> Self {
        Self {
            width,
            v_width,
            height,
            v_height,
        }
    }

    /// Returns `true` when every component is finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.width, self.v_width, self.height, self.v_height]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Pixels per plotted unit along X.
    #[must_use]
    pub fn x_ratio(&self) -> f64 {
        self.width / self.v_width
    }

    /// Pixels per plotted unit along Y.
    #[must_use]
    pub fn y_ratio(&self) -> f64 {
        self.height / self.v_height
    }
}

impl Default for ViewScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}
