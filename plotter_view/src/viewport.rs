// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::scale::ViewScale;

/// Pan/zoom state mapping surface pixels onto the plotted plane.
///
/// `Viewport` stores the pixel offset of the world origin and a uniform zoom
/// factor. Drawing happens in *layer* coordinates: the surface transform is
/// "scale, then translate by the offset", so a layer point `p` lands on the
/// surface at `scale * (p + offset)`.
///
/// Invariants:
/// - `min_scale <= scale <= max_scale` after every mutation.
/// - The [`ViewScale`] components are strictly positive.
#[derive(Clone, Debug)]
pub struct Viewport {
    surface_size: Size,
    offset: Vec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    view_scale: ViewScale,
    origin: Point,
}

impl Viewport {
    /// Creates a viewport for a surface of the given pixel size.
    ///
    /// - The offset centers the world origin on the surface.
    /// - Initial scale is `1.0`, bounded to `[0.5, 4.0]`.
    /// - The view scale is [`ViewScale::DEFAULT`] and the axis origin is `(0, 0)`.
    #[must_use]
    pub fn new(surface_size: Size) -> Self {
        Self {
            surface_size,
            offset: Vec2::new(surface_size.width / 2.0, surface_size.height / 2.0),
            scale: 1.0,
            min_scale: 0.5,
            max_scale: 4.0,
            view_scale: ViewScale::DEFAULT,
            origin: Point::ZERO,
        }
    }

    /// Returns the surface size in pixels.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Sets the surface size in pixels.
    ///
    /// The offset is left untouched; only the visible extents change.
    pub fn set_surface_size(&mut self, size: Size) {
        self.surface_size = size;
    }

    /// Returns the pixel offset of the world origin.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Sets the pixel offset of the world origin.
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Returns the current zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the minimum zoom factor.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum zoom factor.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Sets the zoom factor, clamping it into `[min_scale, max_scale]`.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_scale <= max_scale`. The
    /// current scale is clamped into the new range.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.set_scale(self.scale);
    }

    /// Returns the grid-cell ratio between pixels and plotted units.
    #[must_use]
    pub fn view_scale(&self) -> ViewScale {
        self.view_scale
    }

    /// Sets the grid-cell ratio.
    ///
    /// Returns `false` and leaves the viewport unchanged if any component is
    /// not finite and strictly positive.
    pub fn set_view_scale(&mut self, view_scale: ViewScale) -> bool {
        if !view_scale.is_valid() {
            return false;
        }
        self.view_scale = view_scale;
        true
    }

    /// Returns the layer point the axes are drawn through.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Sets the layer point the axes are drawn through.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Converts a surface pixel into world coordinates.
    ///
    /// `world = (pixel - offset) / scale`.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.offset.x) / self.scale,
            (pt.y - self.offset.y) / self.scale,
        )
    }

    /// Converts world coordinates into a surface pixel.
    ///
    /// This is the exact inverse of [`Viewport::screen_to_world`].
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + self.offset.x,
            pt.y * self.scale + self.offset.y,
        )
    }

    /// Pans by a pointer delta in surface pixels.
    ///
    /// The delta is divided by the current scale before being added to the
    /// offset.
    pub fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.offset += delta / self.scale;
    }

    /// Shifts the offset by `delta` without compensating for scale.
    ///
    /// Keyboard nudges move the origin by a raw amount per key press.
    pub fn nudge(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Adds `delta` to the scale and clamps the result into the scale bounds.
    ///
    /// The offset is not changed. Returns `true` if the scale changed.
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        let old = self.scale;
        self.set_scale(self.scale + delta);
        self.scale != old
    }

    /// Visible extent in layer units: the surface size divided by the scale.
    #[must_use]
    pub fn visible_size(&self) -> Size {
        Size::new(
            self.surface_size.width / self.scale,
            self.surface_size.height / self.scale,
        )
    }

    /// Visible layer-space rectangle under [`Viewport::layer_transform`].
    #[must_use]
    pub fn visible_layer_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(-self.offset.x, -self.offset.y),
            self.visible_size(),
        )
    }

    /// Surface transform for drawing in layer coordinates.
    ///
    /// Scale first, then translate by the offset (the translation is applied
    /// to points before the scale).
    #[must_use]
    pub fn layer_transform(&self) -> Affine {
        Affine::scale(self.scale) * Affine::translate(self.offset)
    }

    /// Maps a plotted point into layer coordinates.
    ///
    /// Plotted `y` grows upwards, layer `y` grows downwards.
    #[must_use]
    pub fn plot_to_layer(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.view_scale.x_ratio(),
            -pt.y * self.view_scale.y_ratio(),
        )
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            surface_size: self.surface_size,
            offset: self.offset,
            scale: self.scale,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            view_scale: self.view_scale,
            origin: self.origin,
            visible_layer_rect: self.visible_layer_rect(),
        }
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Surface size in pixels.
    pub surface_size: Size,
    /// Pixel offset of the world origin.
    pub offset: Vec2,
    /// Current zoom factor.
    pub scale: f64,
    /// Minimum zoom factor.
    pub min_scale: f64,
    /// Maximum zoom factor.
    pub max_scale: f64,
    /// Grid-cell ratio.
    pub view_scale: ViewScale,
    /// Axis origin in layer coordinates.
    pub origin: Point,
    /// Layer rectangle currently visible.
    pub visible_layer_rect: Rect,
}

/// Maps a pointer position in client coordinates onto the surface.
///
/// `bounding_box` is where the surface sits on the page and `surface_size` is
/// its backing pixel size; the two differ when the surface is stretched by
/// layout or device pixel ratio.
#[must_use]
pub fn client_to_surface(client: Point, bounding_box: Rect, surface_size: Size) -> Point {
    let sx = if bounding_box.width() > 0.0 {
        surface_size.width / bounding_box.width()
    } else {
        1.0
    };
    let sy = if bounding_box.height() > 0.0 {
        surface_size.height / bounding_box.height()
    } else {
        1.0
    };
    Point::new(
        (client.x - bounding_box.x0) * sx,
        (client.y - bounding_box.y0) * sy,
    )
}

/// Rounds to the nearest multiple of `0.5`.
#[must_use]
pub fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
