// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless plotter demo.
//!
//! Builds a plotter over a recording surface, replays a short interaction
//! (zoom, drag, keyboard nudges) and logs what each step drew.
//!
//! ```text
//! RUST_LOG=plotter=debug cargo run -p plotter_demos -- --expr "sin(x)"
//! ```

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::{Point, Size, Vec2};
use plotter::{EvalError, InputEvent, KeyCode, Plotter, PlotterConfig};
use plotter_imaging_ref::RecordingSurface;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with plotter options (camelCase keys, e.g. `vScale`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Expression to plot; overrides `generatrix` from the config.
    #[arg(long, short)]
    expr: Option<String>,
    /// Surface width in pixels.
    #[arg(long, default_value_t = 500.0)]
    width: f64,
    /// Surface height in pixels.
    #[arg(long, default_value_t = 500.0)]
    height: f64,
    /// Print every surface operation of the final render.
    #[arg(long)]
    dump_ops: bool,
}

/// A handful of expressions the demo knows how to evaluate.
fn builtin(expr: &str, x: f64) -> Result<f64, EvalError> {
    match expr.replace(' ', "").as_str() {
        "x" => Ok(x),
        "x*x" | "x^2" => Ok(x * x),
        "x*x*x" | "x^3" => Ok(x * x * x),
        "sin(x)" => Ok(x.sin()),
        "cos(x)" => Ok(x.cos()),
        "1/x" => Ok(1.0 / x),
        "sqrt(x)" if x < 0.0 => Err(EvalError::domain(x, "square root of a negative number")),
        "sqrt(x)" => Ok(x.sqrt()),
        _ => Err(EvalError::parse(expr, "not one of the demo expressions")),
    }
}

fn load_config(args: &Args) -> Result<PlotterConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => PlotterConfig::default(),
    };
    if let Some(expr) = &args.expr {
        config.generatrix.clone_from(expr);
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let surface = RecordingSurface::new(Size::new(args.width, args.height));

    let drags = Rc::new(Cell::new(0_u32));
    let seen = Rc::clone(&drags);
    let mut plot = Plotter::new(surface, builtin, config)
        .context("creating plotter")?
        .on_drag(move || seen.set(seen.get() + 1));

    let report = plot.render();
    tracing::info!(
        expression = plot.generatrix(),
        grid_lines = report.grid_lines,
        samples = report.samples,
        points_drawn = report.points_drawn,
        issues = report.issues.len(),
        "initial render"
    );

    let centre = Point::new(args.width / 2.0, args.height / 2.0);
    let script = [
        InputEvent::Wheel { delta_y: 120.0 },
        InputEvent::Wheel { delta_y: 120.0 },
        InputEvent::PointerDown(centre),
        InputEvent::PointerMove(centre + Vec2::new(15.0, 0.0)),
        InputEvent::PointerMove(centre + Vec2::new(40.0, -10.0)),
        InputEvent::PointerUp(centre + Vec2::new(40.0, -10.0)),
        InputEvent::KeyDown(KeyCode::ArrowLeft),
        InputEvent::KeyDown(KeyCode::ArrowLeft),
        InputEvent::KeyDown(KeyCode::ArrowLeft),
        InputEvent::KeyUp(KeyCode::ArrowLeft),
        InputEvent::Wheel { delta_y: -120.0 },
    ];
    for event in script {
        let response = plot.handle_event(event);
        let vp = plot.viewport();
        tracing::info!(
            ?event,
            rendered = response.render,
            cursor = response.cursor.css_name(),
            offset_x = vp.offset().x,
            offset_y = vp.offset().y,
            scale = vp.scale(),
            "event"
        );
    }

    tracing::info!(
        renders = plot.render_count(),
        drag_callbacks = drags.get(),
        viewport = ?plot.viewport().debug_info(),
        "done"
    );

    if args.dump_ops {
        plot.surface_mut().clear_events();
        plot.render();
        for op in plot.surface().ops() {
            println!("{op:?}");
        }
    }
    Ok(())
}
