use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning for one game session, provided by the host.
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Score needed to fill the meter (default: 1000).
    pub max_score: f64,
    /// Gravity subtracted from the acceleration magnitude (default: 9.81).
    pub gravity: f64,
    /// Shake force must exceed this to count (default: 3.0).
    pub noise_threshold: f64,
    /// Cross-fade duration between screens in ms (default: 400).
    pub fade_ms: f64,
    /// First number shown by the countdown (default: 3).
    pub countdown_start: u32,
    /// Countdown tick interval in ms (default: 1000).
    pub countdown_interval_ms: f64,
    /// Minimum gap between haptic/status feedback in ms (default: 100).
    pub feedback_throttle_ms: f64,
    /// How long the shake visual stays on in ms (default: 200).
    pub shake_effect_ms: f64,
    /// Duration of the reveal confetti loop in ms (default: 3000).
    pub confetti_ms: f64,
    /// Percentage above which feedback is intense (default: 80).
    pub intense_band: f64,
    /// Percentage above which feedback is moderate (default: 40).
    pub moderate_band: f64,
    /// Simulated partner contribution. Disabled when absent.
    pub partner: Option<PartnerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_score: 1000.0,
            gravity: 9.81,
            noise_threshold: 3.0,
            fade_ms: 400.0,
            countdown_start: 3,
            countdown_interval_ms: 1000.0,
            feedback_throttle_ms: 100.0,
            shake_effect_ms: 200.0,
            confetti_ms: 3000.0,
            intense_band: 80.0,
            moderate_band: 40.0,
            partner: None,
        }
    }
}

/// Practice partner that adds random score at a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerConfig {
    /// Interval between contributions in ms (default: 500).
    pub interval_ms: f64,
    /// Upper bound (exclusive) of a single contribution (default: 15).
    pub max_amount: f64,
    /// RNG seed (default: 42).
    pub seed: u64,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500.0,
            max_amount: 15.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl Config {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.max_score.is_finite() && self.max_score > 0.0) {
            return invalid("max_score", "must be a positive number");
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return invalid("gravity", "must be non-negative");
        }
        if !(self.noise_threshold.is_finite() && self.noise_threshold >= 0.0) {
            return invalid("noise_threshold", "must be non-negative");
        }
        if !(self.countdown_interval_ms.is_finite() && self.countdown_interval_ms > 0.0) {
            return invalid("countdown_interval_ms", "must be positive");
        }
        let durations = [
            ("fade_ms", self.fade_ms),
            ("feedback_throttle_ms", self.feedback_throttle_ms),
            ("shake_effect_ms", self.shake_effect_ms),
            ("confetti_ms", self.confetti_ms),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be a non-negative duration");
            }
        }
        if !(self.moderate_band < self.intense_band) {
            return invalid("moderate_band", "must be below intense_band");
        }
        if let Some(partner) = &self.partner {
            if !(partner.interval_ms.is_finite() && partner.interval_ms > 0.0) {
                return invalid("partner.interval_ms", "must be positive");
            }
            if !(partner.max_amount.is_finite() && partner.max_amount >= 0.0) {
                return invalid("partner.max_amount", "must be non-negative");
            }
        }
        Ok(())
    }
}
