// Copyright 2025 the Plotter Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard nudge acceleration.
//!
//! Holding a direction key produces a stream of key-down events (auto-repeat).
//! [`NudgeRamp`] turns that stream into an accelerating step size: each
//! key-down raises the velocity by one unit until it reaches the configured
//! maximum, and a key-up drops it back to zero.

/// Velocity ramp for one nudge axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeRamp {
    velocity: f64,
    max: f64,
}

impl NudgeRamp {
    /// Creates a ramp at rest that accelerates up to `max` units per step.
    ///
    /// Negative or NaN maxima are treated as zero.
    #[must_use]
    pub fn new(max: f64) -> Self {
        Self {
            velocity: 0.0,
            max: if max > 0.0 { max } else { 0.0 },
        }
    }

    /// Accelerate by one unit (capped at the maximum) and return the new velocity.
    pub fn step(&mut self) -> f64 {
        if self.velocity < self.max {
            self.velocity = (self.velocity + 1.0).min(self.max);
        }
        self.velocity
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Maximum velocity.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Stop: the next [`NudgeRamp::step`] starts again from one unit.
    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }
}

impl Default for NudgeRamp {
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NudgeRamp;

    #[test]
    fn ramps_by_one_per_step() {
        let mut ramp = NudgeRamp::default();
        for n in 1..20 {
            assert_eq!(ramp.step(), f64::from(n));
        }
    }

    #[test]
    fn never_exceeds_max() {
        let mut ramp = NudgeRamp::new(20.0);
        for _ in 0..100 {
            assert!(ramp.step() <= 20.0);
        }
        assert_eq!(ramp.velocity(), 20.0);
    }

    #[test]
    fn fractional_max_caps_the_last_step() {
        let mut ramp = NudgeRamp::new(2.5);
        ramp.step();
        ramp.step();
        assert_eq!(ramp.step(), 2.5);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut ramp = NudgeRamp::new(5.0);
        ramp.step();
        ramp.step();
        ramp.reset();
        assert_eq!(ramp.velocity(), 0.0);
        assert_eq!(ramp.step(), 1.0);
    }

    #[test]
    fn negative_max_never_moves() {
        let mut ramp = NudgeRamp::new(-3.0);
        assert_eq!(ramp.max(), 0.0);
        assert_eq!(ramp.step(), 0.0);
    }
}
