// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use plotter_imaging::{StateOp, Surface, SurfaceExt, SurfaceResolver};
use plotter_view::{Viewport, client_to_surface};

use crate::config::PlotterConfig;
use crate::controller::{CursorIcon, InputEvent, InteractionController, Nudge, Response};
use crate::error::PlotterError;
use crate::eval::Evaluator;
use crate::grid::{self, GridLine, grid_lines};
use crate::render::{DrawOptions, RenderCycle, RenderReport};
use crate::sampler::{Samples, sample_visible};

/// Where a [`Plotter`] gets its drawing surface from.
#[derive(Debug)]
pub enum SurfaceHandle<S> {
    /// An already acquired surface.
    Direct(S),
    /// A key to resolve through a [`SurfaceResolver`], e.g. a CSS selector.
    Lookup(String),
}

impl<S> From<S> for SurfaceHandle<S>
where
    S: Surface,
{
    fn from(surface: S) -> Self {
        Self::Direct(surface)
    }
}

/// Interactive function plot over a drawing surface.
///
/// The widget owns the surface, the expression evaluator, the viewport and
/// the interaction state. Feed it input with [`Plotter::handle_event`]; it
/// re-renders whenever an event changes the picture.
pub struct Plotter<S, E>
where
    S: Surface,
    E: Evaluator,
{
    surface: S,
    evaluator: E,
    viewport: Viewport,
    controller: InteractionController,
    cycle: RenderCycle,
    generatrix: String,
    on_drag: Option<Box<dyn FnMut()>>,
    render_count: u64,
}

impl<S, E> fmt::Debug for Plotter<S, E>
where
    S: Surface,
    E: Evaluator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plotter")
            .field("viewport", &self.viewport)
            .field("controller", &self.controller)
            .field("cycle", &self.cycle)
            .field("generatrix", &self.generatrix)
            .field("has_on_drag", &self.on_drag.is_some())
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

impl<S, E> Plotter<S, E>
where
    S: Surface,
    E: Evaluator,
{
    /// Creates a plotter drawing into `surface`.
    ///
    /// The config is validated first; see [`PlotterConfig::validate`].
    /// Nothing is drawn until the first [`Plotter::render`] or a rendering
    /// event.
    pub fn new(surface: S, evaluator: E, config: PlotterConfig) -> Result<Self, PlotterError> {
        let config = config.validate()?;
        let viewport = config.viewport(surface.size());
        tracing::debug!(viewport = ?viewport.debug_info(), "plotter created");
        Ok(Self {
            surface,
            evaluator,
            viewport,
            controller: InteractionController::new(
                config.max_nudge_x,
                config.max_nudge_y,
                config.zoom_step,
            ),
            cycle: RenderCycle {
                sample_count: config.sample_count,
                ..RenderCycle::default()
            },
            generatrix: config.generatrix,
            on_drag: None,
            render_count: 0,
        })
    }

    /// Creates a plotter from a surface handle, resolving lookups through
    /// `resolver`.
    ///
    /// Fails with [`PlotterError::SurfaceNotFound`] if the key resolves to
    /// nothing.
    pub fn from_handle<R>(
        handle: SurfaceHandle<S>,
        resolver: &mut R,
        evaluator: E,
        config: PlotterConfig,
    ) -> Result<Self, PlotterError>
    where
        R: SurfaceResolver<Surface = S> + ?Sized,
    {
        let surface = match handle {
            SurfaceHandle::Direct(surface) => surface,
            SurfaceHandle::Lookup(key) => match resolver.resolve(&key) {
                Some(surface) => surface,
                None => return Err(PlotterError::SurfaceNotFound { key }),
            },
        };
        Self::new(surface, evaluator, config)
    }

    /// Routes keyboard nudges to `selection` instead of the view.
    #[must_use]
    pub fn with_selection<N>(mut self, selection: &Rc<RefCell<N>>) -> Self
    where
        N: Nudge + 'static,
    {
        self.set_selection(selection);
        self
    }

    /// Registers a callback run after every event that moved the view or
    /// the selection.
    #[must_use]
    pub fn on_drag(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_on_drag(callback);
        self
    }

    /// Replaces the drag callback.
    pub fn set_on_drag(&mut self, callback: impl FnMut() + 'static) {
        self.on_drag = Some(Box::new(callback));
    }

    /// Routes keyboard nudges to `selection` instead of the view.
    ///
    /// Only a weak reference is kept.
    pub fn set_selection<N>(&mut self, selection: &Rc<RefCell<N>>)
    where
        N: Nudge + 'static,
    {
        self.controller.set_selection(selection);
    }

    /// Routes keyboard nudges back to the view.
    pub fn clear_selection(&mut self) {
        self.controller.clear_selection();
    }

    /// Applies an input event, re-rendering and notifying the drag callback
    /// as needed.
    pub fn handle_event(&mut self, event: InputEvent) -> Response {
        let response = self.controller.handle(event, &mut self.viewport);
        if response.render {
            self.render();
        }
        if response.drag_observed {
            if let Some(callback) = self.on_drag.as_mut() {
                callback();
            }
        }
        response
    }

    /// Reports a pointer-down seen anywhere in the host; focus follows
    /// whether it landed on this plotter's surface.
    pub fn pointer_down_observed(&mut self, on_surface: bool) {
        if self.controller.pointer_down_observed(on_surface) {
            tracing::debug!(focused = on_surface, "plotter focus changed");
        }
    }

    /// Runs a full render cycle.
    pub fn render(&mut self) -> RenderReport {
        self.sync_surface_size();
        self.render_count += 1;
        self.cycle.run(
            &mut self.surface,
            &self.viewport,
            &self.evaluator,
            &self.generatrix,
        )
    }

    /// Number of render cycles run so far.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Picks up a change in the surface's pixel size.
    ///
    /// The offset is kept; only the visible extent changes.
    pub fn sync_surface_size(&mut self) {
        let size = self.surface.size();
        if size != self.viewport.surface_size() {
            tracing::debug!(?size, "surface resized");
            self.viewport.set_surface_size(size);
        }
    }

    /// Cursor to show over the surface.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.controller.cursor()
    }

    /// Whether keyboard events are handled.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.controller.has_focus()
    }

    /// The interaction controller.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport. Changes show on the next render.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Converts a surface pixel into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        self.viewport.screen_to_world(pt)
    }

    /// Converts world coordinates into a surface pixel.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        self.viewport.world_to_screen(pt)
    }

    /// Maps a pointer position in page coordinates onto the surface, given
    /// where the surface sits on the page.
    #[must_use]
    pub fn client_to_surface(&self, client: Point, bounding_box: Rect) -> Point {
        client_to_surface(client, bounding_box, self.surface.size())
    }

    /// Expression currently plotted.
    #[must_use]
    pub fn generatrix(&self) -> &str {
        &self.generatrix
    }

    /// Replaces the plotted expression. Shows on the next render.
    pub fn set_generatrix(&mut self, expression: impl Into<String>) {
        self.generatrix = expression.into();
    }

    /// How the curve is drawn.
    #[must_use]
    pub fn draw_options(&self) -> DrawOptions {
        self.cycle.draw_options
    }

    /// Changes how the curve is drawn. Shows on the next render.
    pub fn set_draw_options(&mut self, options: DrawOptions) {
        self.cycle.draw_options = options;
    }

    /// Samples the current expression over the visible domain.
    #[must_use]
    pub fn sample(&self) -> Samples {
        sample_visible(
            &self.evaluator,
            &self.generatrix,
            &self.viewport,
            self.cycle.sample_count,
        )
    }

    /// Grid lines the next render would draw.
    #[must_use]
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let vs = self.viewport.view_scale();
        grid_lines(&self.viewport, Vec2::new(vs.width, vs.height))
    }

    /// Draws a full-width line at layer `y` over the current picture.
    pub fn draw_horizontal_line(&mut self, y: f64) {
        let viewport = &self.viewport;
        self.surface.with_saved(|s| {
            apply_layer_transform(s, viewport);
            grid::draw_horizontal_line(s, viewport, y);
        });
    }

    /// Draws a full-height line at layer `x` over the current picture.
    pub fn draw_vertical_line(&mut self, x: f64) {
        let viewport = &self.viewport;
        self.surface.with_saved(|s| {
            apply_layer_transform(s, viewport);
            grid::draw_vertical_line(s, viewport, x);
        });
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the plotter, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

fn apply_layer_transform<S>(surface: &mut S, viewport: &Viewport)
where
    S: Surface + ?Sized,
{
    let scale = viewport.scale();
    surface.state(StateOp::Scale(Vec2::new(scale, scale)));
    surface.state(StateOp::Translate(viewport.offset()));
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use plotter_imaging_ref::RecordingSurface;

    use super::*;
    use crate::eval::EvalError;

    type Eval = fn(&str, f64) -> Result<f64, EvalError>;

    fn square(_: &str, x: f64) -> Result<f64, EvalError> {
        Ok(x * x)
    }

    fn plotter() -> Plotter<RecordingSurface, Eval> {
        Plotter::new(
            RecordingSurface::new(Size::new(500.0, 500.0)),
            square as Eval,
            PlotterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn construction_does_not_draw() {
        let p = plotter();
        assert_eq!(p.render_count(), 0);
        assert!(p.surface().events().is_empty());
    }

    #[test]
    fn helper_lines_are_drawn_in_layer_space() {
        let mut p = plotter();
        p.draw_horizontal_line(0.0);
        let (_, state) = p.surface().stroked_paths().next().unwrap();
        assert_eq!(state.transform, p.viewport().layer_transform());
        assert_eq!(p.surface().current_state().save_depth, 0);
    }

    #[test]
    fn render_picks_up_surface_resize() {
        let mut p = plotter();
        p.surface_mut().resize(Size::new(800.0, 400.0));
        p.render();
        assert_eq!(p.viewport().surface_size(), Size::new(800.0, 400.0));
        assert_eq!(p.viewport().offset(), Vec2::new(250.0, 250.0));
    }

    #[test]
    fn client_mapping_uses_surface_size() {
        let p = plotter();
        let at = p.client_to_surface(Point::new(110.0, 60.0), Rect::new(10.0, 10.0, 260.0, 260.0));
        assert_eq!(at, Point::new(200.0, 100.0));
    }
}
