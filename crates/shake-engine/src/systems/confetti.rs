//! Time-boxed confetti loop for the reveal screen.

use crate::api::types::{ConfettiBurst, Effect, Millis};
use crate::core::time::Deadline;

pub const CONFETTI_COLORS: [&str; 2] = ["#FF007F", "#7000FF"];

const PARTICLES_PER_BURST: u32 = 5;
const SPREAD: f64 = 55.0;

impl ConfettiBurst {
    /// Burst fired up and to the right from the left edge.
    pub fn left_edge() -> Self {
        Self {
            particle_count: PARTICLES_PER_BURST,
            angle: 60.0,
            spread: SPREAD,
            origin_x: 0.0,
            colors: &CONFETTI_COLORS,
        }
    }

    /// Mirror of `left_edge` from the right edge.
    pub fn right_edge() -> Self {
        Self {
            particle_count: PARTICLES_PER_BURST,
            angle: 120.0,
            spread: SPREAD,
            origin_x: 1.0,
            colors: &CONFETTI_COLORS,
        }
    }
}

/// Emits two symmetric bursts per animation frame until its duration elapses.
/// Self-terminating; there is no external cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiLoop {
    end: Deadline,
    running: bool,
}

impl ConfettiLoop {
    /// Start the loop and fire its first frame immediately.
    pub fn start(now: Millis, duration: Millis, effects: &mut Vec<Effect>) -> Self {
        let mut lp = Self {
            end: Deadline::after(now, duration),
            running: true,
        };
        lp.frame(now, effects);
        lp
    }

    /// Fire one frame if still running. The frame that observes the deadline is the last.
    pub fn frame(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        if !self.running {
            return;
        }
        effects.push(Effect::Confetti(ConfettiBurst::left_edge()));
        effects.push(Effect::Confetti(ConfettiBurst::right_edge()));
        if self.end.is_due(now) {
            self.running = false;
            log::debug!("confetti: finished");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bursts(fx: &[Effect]) -> usize {
        fx.iter().filter(|e| matches!(e, Effect::Confetti(_))).count()
    }

    #[test]
    fn first_frame_fires_on_start() {
        let mut fx = Vec::new();
        let lp = ConfettiLoop::start(0.0, 3000.0, &mut fx);
        assert!(lp.is_running());
        assert_eq!(
            fx,
            vec![
                Effect::Confetti(ConfettiBurst::left_edge()),
                Effect::Confetti(ConfettiBurst::right_edge()),
            ]
        );
    }

    #[test]
    fn stops_after_duration() {
        let mut fx = Vec::new();
        let mut lp = ConfettiLoop::start(0.0, 3000.0, &mut fx);
        let mut t = 0.0;
        while t < 3000.0 {
            t += 16.0;
            lp.frame(t, &mut fx);
        }
        assert!(!lp.is_running());
        let fired = bursts(&fx);

        lp.frame(t + 16.0, &mut fx);
        assert_eq!(bursts(&fx), fired, "no bursts after the loop ends");
        // 1 start frame + 188 frames up to and past 3000ms, two bursts each.
        assert_eq!(fired, 2 * 189);
    }

    #[test]
    fn bursts_are_mirrored() {
        let l = ConfettiBurst::left_edge();
        let r = ConfettiBurst::right_edge();
        assert_eq!(l.angle + r.angle, 180.0);
        assert_eq!(l.origin_x + r.origin_x, 1.0);
        assert_eq!(l.colors, r.colors);
    }
}
