//! Throttled haptic and status feedback driven by meter percentage.

use crate::api::config::Config;
use crate::api::types::{Effect, Millis};
use crate::core::time::Deadline;

/// Fast heartbeat.
pub const INTENSE_PATTERN: [u32; 2] = [50, 50];
pub const MODERATE_PATTERN: [u32; 1] = [30];
/// Fired once when the meter fills.
pub const CLIMAX_PATTERN: [u32; 5] = [100, 50, 100, 50, 500];

pub const STATUS_ALMOST_THERE: &str = "ALMOST THERE!";
pub const STATUS_GO: &str = "GO GO GO!";

/// Feedback intensity for a meter percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Intense,
    Moderate,
    Calm,
}

impl Band {
    /// Strictly above `intense_band` is intense, strictly above `moderate_band` is moderate.
    pub fn for_percentage(percentage: f64, config: &Config) -> Band {
        if percentage > config.intense_band {
            Band::Intense
        } else if percentage > config.moderate_band {
            Band::Moderate
        } else {
            Band::Calm
        }
    }
}

/// Meter outputs for a percentage: fill amount and a heart scale growing to 2x.
pub fn meter(percentage: f64) -> Effect {
    Effect::SetMeter {
        fill_percent: percentage,
        heart_scale: 1.0 + percentage / 100.0,
    }
}

/// Publishes meter updates on every score change and band feedback at most once per throttle window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackEmitter {
    last_feedback: Option<Millis>,
    shake_clear: Option<Deadline>,
}

impl FeedbackEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(
        &mut self,
        percentage: f64,
        now: Millis,
        config: &Config,
        haptics: bool,
        effects: &mut Vec<Effect>,
    ) {
        effects.push(meter(percentage));

        if let Some(last) = self.last_feedback {
            if now - last <= config.feedback_throttle_ms {
                return;
            }
        }

        match Band::for_percentage(percentage, config) {
            Band::Intense => {
                if haptics {
                    effects.push(Effect::Vibrate(INTENSE_PATTERN.to_vec()));
                }
                effects.push(Effect::SetStatus(STATUS_ALMOST_THERE));
                effects.push(Effect::SetShakeEffect(true));
                // A pending clear is never pushed back, so sustained shaking still pulses.
                if self.shake_clear.is_none() {
                    self.shake_clear = Some(Deadline::after(now, config.shake_effect_ms));
                }
            }
            Band::Moderate => {
                if haptics {
                    effects.push(Effect::Vibrate(MODERATE_PATTERN.to_vec()));
                }
                effects.push(Effect::SetStatus(STATUS_GO));
            }
            Band::Calm => {}
        }
        self.last_feedback = Some(now);
    }

    /// Clear the shake visual once its duration has elapsed.
    pub fn tick(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        if let Some(deadline) = self.shake_clear {
            if deadline.is_due(now) {
                self.shake_clear = None;
                effects.push(Effect::SetShakeEffect(false));
            }
        }
    }

    pub fn last_feedback(&self) -> Option<Millis> {
        self.last_feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vibrations(fx: &[Effect]) -> Vec<&Vec<u32>> {
        fx.iter()
            .filter_map(|e| match e {
                Effect::Vibrate(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bands_map_deterministically() {
        let c = Config::default();
        assert_eq!(Band::for_percentage(85.0, &c), Band::Intense);
        assert_eq!(Band::for_percentage(50.0, &c), Band::Moderate);
        assert_eq!(Band::for_percentage(20.0, &c), Band::Calm);
        // Boundaries belong to the lower band.
        assert_eq!(Band::for_percentage(80.0, &c), Band::Moderate);
        assert_eq!(Band::for_percentage(40.0, &c), Band::Calm);
    }

    #[test]
    fn intense_feedback_sets_status_shake_and_vibration() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        fb.publish(85.0, 1000.0, &c, true, &mut fx);
        assert_eq!(
            fx,
            vec![
                meter(85.0),
                Effect::Vibrate(vec![50, 50]),
                Effect::SetStatus(STATUS_ALMOST_THERE),
                Effect::SetShakeEffect(true),
            ]
        );

        fx.clear();
        fb.tick(1199.0, &mut fx);
        assert!(fx.is_empty());
        fb.tick(1200.0, &mut fx);
        assert_eq!(fx, vec![Effect::SetShakeEffect(false)]);
    }

    #[test]
    fn sustained_intense_feedback_still_clears_shake() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        let mut first_clear = None;
        let mut t = 0.0;
        while t <= 1000.0 {
            if (t as u32) % 150 == 0 {
                fb.publish(90.0, t, &c, true, &mut fx);
            }
            fb.tick(t, &mut fx);
            if first_clear.is_none() && fx.contains(&Effect::SetShakeEffect(false)) {
                first_clear = Some(t);
            }
            t += 10.0;
        }
        assert_eq!(first_clear, Some(200.0));
        let clears = fx.iter().filter(|e| **e == Effect::SetShakeEffect(false)).count();
        assert!(clears >= 3, "shake cleared only {} times", clears);
    }

    #[test]
    fn calm_band_only_updates_meter() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        fb.publish(20.0, 0.0, &c, true, &mut fx);
        assert_eq!(fx, vec![meter(20.0)]);
        assert_eq!(fb.last_feedback(), Some(0.0));
    }

    #[test]
    fn throttle_suppresses_feedback_but_not_meter() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        fb.publish(50.0, 1000.0, &c, true, &mut fx);
        fb.publish(55.0, 1100.0, &c, true, &mut fx);
        fb.publish(60.0, 1101.0, &c, true, &mut fx);

        assert_eq!(vibrations(&fx).len(), 2);
        let meters = fx.iter().filter(|e| matches!(e, Effect::SetMeter { .. })).count();
        assert_eq!(meters, 3);
    }

    #[test]
    fn calm_feedback_still_consumes_throttle_window() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        fb.publish(10.0, 1000.0, &c, true, &mut fx);
        fb.publish(50.0, 1050.0, &c, true, &mut fx);
        assert!(vibrations(&fx).is_empty());
    }

    #[test]
    fn no_vibration_without_haptics() {
        let c = Config::default();
        let mut fb = FeedbackEmitter::new();
        let mut fx = Vec::new();
        fb.publish(90.0, 0.0, &c, false, &mut fx);
        assert!(vibrations(&fx).is_empty());
        assert!(fx.contains(&Effect::SetStatus(STATUS_ALMOST_THERE)));
    }

    #[test]
    fn heart_scale_doubles_at_full() {
        assert_eq!(
            meter(100.0),
            Effect::SetMeter { fill_percent: 100.0, heart_scale: 2.0 }
        );
    }
}
