// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns a scalar expression into a finite sequence of plotted points.
//!
//! Sampling is stateless: every call recomputes the domain from the current
//! viewport and evaluates the expression afresh.

use std::ops::RangeInclusive;

use kurbo::Point;
use plotter_view::Viewport;

use crate::error::SampleError;
use crate::eval::Evaluator;

/// Upper bound on the number of samples produced for one domain.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Evenly spaced sample positions: `start, start + step, ...` up to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleDomain {
    /// First sample position.
    pub start: f64,
    /// Last admissible sample position (inclusive).
    pub end: f64,
    /// Distance between consecutive samples.
    pub step: f64,
}

impl SampleDomain {
    /// Domain covering the visible plot for `viewport` at `sample_count`
    /// samples per visible width.
    ///
    /// With `cell = view_scale.width`:
    /// - `step = surface_width / scale / cell / sample_count`
    /// - `start = -(floor(offset_x / cell) + 1)`
    /// - `end = ceil(surface_width / cell) + 1`
    ///
    /// Returns `None` when the step is not a positive finite number.
    #[must_use]
    pub fn visible(viewport: &Viewport, sample_count: usize) -> Option<Self> {
        if sample_count == 0 {
            return None;
        }
        let cell = viewport.view_scale().width;
        let surface_width = viewport.surface_size().width;
        let visible_cells = surface_width / viewport.scale() / cell;
        let step = visible_cells / sample_count as f64;
        let start = -((viewport.offset().x / cell).floor() + 1.0);
        let end = (surface_width / cell).ceil() + 1.0;
        Self::checked(start, end, step)
    }

    /// Domain spanning `range` split into `sample_count` intervals.
    #[must_use]
    pub fn over(range: RangeInclusive<f64>, sample_count: usize) -> Option<Self> {
        if sample_count == 0 {
            return None;
        }
        let (start, end) = range.into_inner();
        Self::checked(start, end, (end - start) / sample_count as f64)
    }

    fn checked(start: f64, end: f64, step: f64) -> Option<Self> {
        if !(step.is_finite() && step > 0.0 && start.is_finite() && end.is_finite()) {
            return None;
        }
        Some(Self { start, end, step })
    }

    /// Whole steps from `start` to `end`, before the cap.
    fn intervals(&self) -> f64 {
        // Allow for rounding when `end` is an exact multiple of `step`.
        ((self.end - self.start) / self.step + 1e-9).floor()
    }

    /// Number of positions in the domain, capped at [`MAX_SAMPLES`].
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "intervals is non-negative and below MAX_SAMPLES when cast."
    )]
    pub fn len(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        let intervals = self.intervals();
        if intervals >= MAX_SAMPLES as f64 {
            MAX_SAMPLES
        } else {
            intervals as usize + 1
        }
    }

    /// Returns `true` if the domain holds more than [`MAX_SAMPLES`]
    /// positions, so [`SampleDomain::positions`] stops before `end`.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.end >= self.start && self.intervals() >= MAX_SAMPLES as f64
    }

    /// Returns `true` if the domain holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample positions in increasing order.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }
}

/// Points produced by one sampling pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Samples {
    /// Points in increasing `x` order. Non-finite `y` values are kept.
    pub points: Vec<Point>,
    /// Samples that were skipped or cannot be drawn.
    pub issues: Vec<SampleError>,
}

impl Samples {
    /// Points whose coordinates are both finite.
    pub fn finite_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied().filter(|p| p.is_finite())
    }
}

/// Evaluate `expression` at every position of `domain`.
///
/// - Evaluator errors skip the point and are recorded as
///   [`SampleError::Evaluation`].
/// - Non-finite results are emitted as-is and recorded as
///   [`SampleError::NonFinite`].
/// - A domain longer than [`MAX_SAMPLES`] is cut there and recorded as
///   [`SampleError::Truncated`].
pub fn sample<E>(evaluator: &E, expression: &str, domain: &SampleDomain) -> Samples
where
    E: Evaluator + ?Sized,
{
    let mut out = Samples {
        points: Vec::with_capacity(domain.len()),
        issues: Vec::new(),
    };
    for x in domain.positions() {
        match evaluator.evaluate(expression, x) {
            Ok(y) => {
                if !y.is_finite() {
                    out.issues.push(SampleError::NonFinite { x, y });
                }
                out.points.push(Point::new(x, y));
            }
            Err(source) => out.issues.push(SampleError::Evaluation { x, source }),
        }
    }
    if domain.is_truncated() {
        let x = domain.start + MAX_SAMPLES as f64 * domain.step;
        tracing::warn!(
            expression,
            step = domain.step,
            end = domain.end,
            limit = MAX_SAMPLES,
            "sample domain too dense, stopped at x = {x}"
        );
        out.issues.push(SampleError::Truncated {
            x,
            limit: MAX_SAMPLES,
        });
    }
    out
}

/// Sample `expression` over the visible domain of `viewport`.
pub fn sample_visible<E>(
    evaluator: &E,
    expression: &str,
    viewport: &Viewport,
    sample_count: usize,
) -> Samples
where
    E: Evaluator + ?Sized,
{
    match SampleDomain::visible(viewport, sample_count) {
        Some(domain) => sample(evaluator, expression, &domain),
        None => Samples::default(),
    }
}
