// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=plotter_imaging_web_canvas --heading-base-level=0

//! Web Canvas (2D) surface for the Plotter drawing IR.
//!
//! This crate provides a [`Surface`] implementation backed by
//! `web_sys::CanvasRenderingContext2d` when targeting `wasm32`, plus a
//! [`SurfaceResolver`] that finds `<canvas>` elements with
//! `document.querySelector`.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn make_surface(
//!     canvas: web_sys::HtmlCanvasElement,
//! ) -> Result<plotter_imaging_web_canvas::WebCanvasSurface, wasm_bindgen::JsValue> {
//!     plotter_imaging_web_canvas::WebCanvasSurface::new(canvas)
//! }
//! ```
//!
//! Notes:
//! - Every IR op maps onto a single Canvas 2D call; state save/restore uses the
//!   canvas' own state stack.
//! - Canvas errors (for example a non-invertible transform) are ignored; the
//!   canvas keeps its previous state, matching browser behavior for script
//!   callers.
//! - On other targets the surface type is uninhabited and the resolver never
//!   finds anything, so the crate can stay in the workspace.

#![no_std]

extern crate alloc;

use plotter_imaging::{DrawOp, StateOp, Surface, SurfaceResolver};

#[cfg(target_arch = "wasm32")]
use alloc::string::{String, ToString};
#[cfg(target_arch = "wasm32")]
use core::fmt;
#[cfg(target_arch = "wasm32")]
use kurbo::{PathEl, Size};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[cfg(target_arch = "wasm32")]
fn color_to_css(color: peniko::Color) -> String {
    // `Rgba8` formats as a CSS `rgb(...)`/`rgba(...)` string.
    color.to_rgba8().to_string()
}

/// Canvas 2D surface (only available on `wasm32`).
#[cfg(target_arch = "wasm32")]
pub struct WebCanvasSurface {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

#[cfg(target_arch = "wasm32")]
impl fmt::Debug for WebCanvasSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebCanvasSurface { .. }")
    }
}

#[cfg(target_arch = "wasm32")]
impl WebCanvasSurface {
    /// Create a surface drawing into the 2D context of `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, canvas })
    }

    /// The underlying canvas element, e.g. for setting the cursor style.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

#[cfg(target_arch = "wasm32")]
impl Surface for WebCanvasSurface {
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::Save => self.ctx.save(),
            StateOp::Restore => self.ctx.restore(),
            StateOp::Scale(s) => {
                let _ = self.ctx.scale(s.x, s.y);
            }
            StateOp::Translate(t) => {
                let _ = self.ctx.translate(t.x, t.y);
            }
            StateOp::SetStrokeColor(c) => self.ctx.set_stroke_style_str(&color_to_css(c)),
            StateOp::SetFillColor(c) => self.ctx.set_fill_style_str(&color_to_css(c)),
            StateOp::SetLineWidth(w) => self.ctx.set_line_width(w),
            StateOp::SetFont(font) => self.ctx.set_font(&font.to_css()),
        }
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::ClearRect(r) => self.ctx.clear_rect(r.x0, r.y0, r.width(), r.height()),
            DrawOp::StrokePath(path) => {
                self.ctx.begin_path();
                for el in path.elements() {
                    match *el {
                        PathEl::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                        PathEl::LineTo(p) => self.ctx.line_to(p.x, p.y),
                        PathEl::QuadTo(p1, p) => self.ctx.quadratic_curve_to(p1.x, p1.y, p.x, p.y),
                        PathEl::CurveTo(p1, p2, p) => {
                            self.ctx.bezier_curve_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
                        }
                        PathEl::ClosePath => self.ctx.close_path(),
                    }
                }
                self.ctx.stroke();
            }
            DrawOp::StrokeArc(arc) => {
                self.ctx.begin_path();
                let end = arc.start_angle + arc.sweep_angle;
                let _ = self.ctx.ellipse_with_anticlockwise(
                    arc.center.x,
                    arc.center.y,
                    arc.radii.x,
                    arc.radii.y,
                    arc.x_rotation,
                    arc.start_angle,
                    end,
                    arc.sweep_angle < 0.0,
                );
                self.ctx.stroke();
            }
            DrawOp::FillText { text, origin } => {
                let _ = self.ctx.fill_text(&text, origin.x, origin.y);
            }
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }
}

/// Resolves CSS selectors to `<canvas>` elements in the current document.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorResolver;

#[cfg(target_arch = "wasm32")]
impl SurfaceResolver for SelectorResolver {
    type Surface = WebCanvasSurface;

    fn resolve(&mut self, key: &str) -> Option<WebCanvasSurface> {
        let document = web_sys::window()?.document()?;
        let element = document.query_selector(key).ok()??;
        let canvas = element.dyn_into::<HtmlCanvasElement>().ok()?;
        WebCanvasSurface::new(canvas).ok()
    }
}

/// Placeholder for non-wasm targets; it has no values.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub enum WebCanvasSurface {}

#[cfg(not(target_arch = "wasm32"))]
impl Surface for WebCanvasSurface {
    fn size(&self) -> kurbo::Size {
        match *self {}
    }
    fn state(&mut self, _op: StateOp) {
        match *self {}
    }
    fn draw(&mut self, _op: DrawOp) {
        match *self {}
    }
    fn measure_text(&mut self, _text: &str) -> f64 {
        match *self {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SurfaceResolver for SelectorResolver {
    type Surface = WebCanvasSurface;

    fn resolve(&mut self, _key: &str) -> Option<WebCanvasSurface> {
        None
    }
}
