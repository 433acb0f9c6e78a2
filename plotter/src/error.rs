// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for construction, configuration, and sampling.

use thiserror::Error;

use crate::eval::EvalError;

/// Errors that prevent a [`Plotter`](crate::Plotter) from being built.
#[derive(Debug, Error)]
pub enum PlotterError {
    /// The surface handle did not resolve to a drawing surface.
    #[error("drawing surface `{key}` not found")]
    SurfaceNotFound {
        /// Lookup key that failed to resolve.
        key: String,
    },
    /// The configuration was rejected.
    #[error("invalid plotter configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`PlotterConfig`](crate::PlotterConfig) is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric option is NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NonFinite {
        /// Option name.
        field: &'static str,
    },
    /// An option that must be strictly positive is not.
    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive {
        /// Option name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `minScale` is larger than `maxScale`.
    #[error("scale bounds are inverted: minScale {min} > maxScale {max}")]
    InvertedScaleBounds {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// `sampleCount` is zero.
    #[error("`sampleCount` must be at least 1")]
    ZeroSampleCount,
}

/// A sample that did not produce a drawable point.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SampleError {
    /// The evaluator failed; the point was skipped.
    #[error("sample at x = {x} skipped: {source}")]
    Evaluation {
        /// Sample position.
        x: f64,
        /// Evaluator error.
        source: EvalError,
    },
    /// The evaluator returned a non-finite value; the point is kept in the
    /// sample sequence but left out of the drawn geometry.
    #[error("sample at x = {x} is not finite (y = {y})")]
    NonFinite {
        /// Sample position.
        x: f64,
        /// Value returned by the evaluator.
        y: f64,
    },
    /// The domain needed more samples than allowed; nothing from `x` on
    /// was evaluated.
    #[error("sampling stopped at x = {x} after {limit} samples")]
    Truncated {
        /// First position left out.
        x: f64,
        /// Sample limit that was reached.
        limit: usize,
    },
}

impl SampleError {
    /// Sample position the error refers to.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Evaluation { x, .. } | Self::NonFinite { x, .. } | Self::Truncated { x, .. } => {
                *x
            }
        }
    }
}
