//! Motion scoring: shake force per sample and the bounded score accumulator.

use glam::DVec3;

use crate::input::event::MotionSample;

/// Distance of the acceleration magnitude from resting gravity.
pub fn shake_force(acceleration: DVec3, gravity: f64) -> f64 {
    (acceleration.length() - gravity).abs()
}

/// Outcome of filtering one motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleVerdict {
    /// Force above the noise threshold; add it to the score.
    Accepted(f64),
    /// Force at or below the threshold.
    Noise(f64),
    /// A missing or non-finite axis.
    Malformed,
}

/// Stateless per-sample filter. No smoothing or windowing.
pub fn evaluate(sample: &MotionSample, gravity: f64, threshold: f64) -> SampleVerdict {
    let Some(acceleration) = sample.vector() else {
        return SampleVerdict::Malformed;
    };
    let force = shake_force(acceleration, gravity);
    if force > threshold {
        SampleVerdict::Accepted(force)
    } else {
        SampleVerdict::Noise(force)
    }
}

/// Result of adding to a `Score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    pub value: f64,
    /// True only on the add that first filled the score.
    pub reached_max: bool,
}

/// Non-decreasing accumulator clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    value: f64,
    max: f64,
}

impl Score {
    pub fn new(max: f64) -> Self {
        Self { value: 0.0, max }
    }

    /// Add a contribution. Negative and non-finite amounts are ignored.
    pub fn add(&mut self, amount: f64) -> ScoreUpdate {
        let was_full = self.is_full();
        if amount.is_finite() && amount > 0.0 {
            self.value = (self.value + amount).min(self.max);
        }
        ScoreUpdate {
            value: self.value,
            reached_max: !was_full && self.is_full(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn percentage(&self) -> f64 {
        self.value / self.max * 100.0
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}
