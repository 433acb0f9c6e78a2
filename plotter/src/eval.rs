// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expression evaluation capability.
//!
//! The widget never parses or compiles expressions itself. Hosts plug in an
//! [`Evaluator`] that knows how to compute `y` for a generatrix string at a
//! given `x`; any closure `Fn(&str, f64) -> Result<f64, EvalError>` works.
//!
//! ```
//! use plotter::{EvalError, Evaluator};
//!
//! let eval = |expr: &str, x: f64| match expr {
//!     "x*x" => Ok(x * x),
//!     other => Err(EvalError::parse(other, "unsupported")),
//! };
//! assert_eq!(eval.evaluate("x*x", 3.0), Ok(9.0));
//! assert!(eval.evaluate("sin(", 0.0).is_err());
//! ```

use thiserror::Error;

/// Failure reported by an [`Evaluator`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// The expression is malformed.
    #[error("cannot parse `{expression}`: {message}")]
    Parse {
        /// Expression text.
        expression: String,
        /// Parser message.
        message: String,
    },
    /// The expression is well formed but failed at this `x`.
    #[error("evaluation failed at x = {x}: {message}")]
    Domain {
        /// Input value.
        x: f64,
        /// Evaluator message.
        message: String,
    },
}

impl EvalError {
    /// Shorthand for [`EvalError::Parse`].
    pub fn parse(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Shorthand for [`EvalError::Domain`].
    pub fn domain(x: f64, message: impl Into<String>) -> Self {
        Self::Domain {
            x,
            message: message.into(),
        }
    }
}

/// Single-variable scalar evaluator.
pub trait Evaluator {
    /// Evaluate `expression` with its variable bound to `x`.
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, f64) -> Result<f64, EvalError>,
{
    fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        self(expression, x)
    }
}
