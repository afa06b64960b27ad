//! Practice partner: a stand-in that adds random score on a fixed interval.

use crate::api::config::PartnerConfig;
use crate::api::types::Millis;
use crate::core::time::Interval;
use super::rng::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct PracticePartner {
    interval: Interval,
    max_amount: f64,
    rng: Rng,
}

impl PracticePartner {
    pub fn new(config: &PartnerConfig, now: Millis) -> Self {
        Self {
            interval: Interval::starting_at(now, config.interval_ms),
            max_amount: config.max_amount,
            rng: Rng::new(config.seed),
        }
    }

    /// Contributions due up to `now`, one per elapsed interval, each in [0, max_amount).
    pub fn poll(&mut self, now: Millis) -> Vec<f64> {
        (0..self.interval.poll(now))
            .map(|_| self.rng.next_f64() * self.max_amount)
            .collect()
    }
}
