// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options.
//!
//! Field names follow the camelCase keys hosts already use, so a config can
//! be loaded straight from JSON. Any omitted key keeps its default.

use kurbo::{Point, Size, Vec2};
use plotter_view::{ViewScale, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options recognized when constructing a [`Plotter`](crate::Plotter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotterConfig {
    /// Horizontal pixel offset of the world origin. Defaults to half the
    /// surface width.
    pub offset_x: Option<f64>,
    /// Vertical pixel offset of the world origin. Defaults to half the
    /// surface height.
    pub offset_y: Option<f64>,
    /// Initial zoom factor.
    pub scale: f64,
    /// Smallest zoom factor.
    pub min_scale: f64,
    /// Largest zoom factor.
    pub max_scale: f64,
    /// Grid-cell ratio between pixels and plotted units.
    #[serde(rename = "vScale")]
    pub view_scale: ViewScaleConfig,
    /// Expression plotted as a function of `x`.
    pub generatrix: String,
    /// Layer point the axes pass through.
    pub origin: OriginConfig,
    /// Top speed of horizontal keyboard nudging.
    #[serde(rename = "vMaxOffsetX")]
    pub max_nudge_x: f64,
    /// Top speed of vertical keyboard nudging.
    #[serde(rename = "vMaxOffsetY")]
    pub max_nudge_y: f64,
    /// Scale change per wheel tick.
    pub zoom_step: f64,
    /// Samples per visible width.
    pub sample_count: usize,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            offset_x: None,
            offset_y: None,
            scale: 1.0,
            min_scale: 0.5,
            max_scale: 4.0,
            view_scale: ViewScaleConfig::default(),
            generatrix: "x".to_owned(),
            origin: OriginConfig::default(),
            max_nudge_x: 20.0,
            max_nudge_y: 20.0,
            zoom_step: 0.1,
            sample_count: 100,
        }
    }
}

/// Serialized form of [`ViewScale`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewScaleConfig {
    /// Pixels per grid cell horizontally.
    pub width: f64,
    /// Plotted units per grid cell horizontally.
    pub v_width: f64,
    /// Pixels per grid cell vertically.
    pub height: f64,
    /// Plotted units per grid cell vertically.
    pub v_height: f64,
}

impl Default for ViewScaleConfig {
    fn default() -> Self {
        ViewScale::DEFAULT.into()
    }
}

impl From<ViewScale> for ViewScaleConfig {
    fn from(v: ViewScale) -> Self {
        Self {
            width: v.width,
            v_width: v.v_width,
            height: v.height,
            v_height: v.v_height,
        }
    }
}

impl From<ViewScaleConfig> for ViewScale {
    fn from(v: ViewScaleConfig) -> Self {
        Self::new(v.width, v.v_width, v.height, v.v_height)
    }
}

/// Serialized form of the axis origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Layer `x` of the vertical axis.
    pub x: f64,
    /// Layer `y` of the horizontal axis.
    pub y: f64,
}

impl From<OriginConfig> for Point {
    fn from(o: OriginConfig) -> Self {
        Self::new(o.x, o.y)
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl PlotterConfig {
    /// Checks the options and normalizes what can be normalized.
    ///
    /// Returns an error for non-finite numbers, a non-positive view scale,
    /// `minScale`, `zoomStep` or `vMaxOffset*`, inverted scale bounds, or a
    /// zero `sampleCount`. A `scale` outside `[minScale, maxScale]` is
    /// clamped into range.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if let Some(x) = self.offset_x {
            finite("offsetX", x)?;
        }
        if let Some(y) = self.offset_y {
            finite("offsetY", y)?;
        }
        finite("scale", self.scale)?;
        positive("minScale", self.min_scale)?;
        finite("maxScale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        positive("vScale.width", self.view_scale.width)?;
        positive("vScale.vWidth", self.view_scale.v_width)?;
        positive("vScale.height", self.view_scale.height)?;
        positive("vScale.vHeight", self.view_scale.v_height)?;
        finite("origin.x", self.origin.x)?;
        finite("origin.y", self.origin.y)?;
        positive("vMaxOffsetX", self.max_nudge_x)?;
        positive("vMaxOffsetY", self.max_nudge_y)?;
        positive("zoomStep", self.zoom_step)?;
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }

        let clamped = self.scale.clamp(self.min_scale, self.max_scale);
        if clamped != self.scale {
            tracing::warn!(
                scale = self.scale,
                min_scale = self.min_scale,
                max_scale = self.max_scale,
                "initial scale out of bounds, clamped to {clamped}"
            );
            self.scale = clamped;
        }
        Ok(self)
    }

    /// Builds the viewport described by this config for a surface of
    /// `surface_size` pixels.
    ///
    /// Expects a config that passed [`PlotterConfig::validate`].
    #[must_use]
    pub fn viewport(&self, surface_size: Size) -> Viewport {
        let mut viewport = Viewport::new(surface_size);
        let centered = viewport.offset();
        viewport.set_offset(Vec2::new(
            self.offset_x.unwrap_or(centered.x),
            self.offset_y.unwrap_or(centered.y),
        ));
        viewport.set_scale_limits(self.min_scale, self.max_scale);
        viewport.set_scale(self.scale);
        viewport.set_view_scale(self.view_scale.into());
        viewport.set_origin(self.origin.into());
        viewport
    }
}
