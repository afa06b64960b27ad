//! Cross-fading screen controller.

use crate::api::types::{Effect, Millis, Phase};
use crate::core::time::Deadline;

/// Tracks which screen is visible and the single pending fade-in.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenController {
    active: Option<Phase>,
    pending: Option<(Phase, Deadline)>,
}

impl ScreenController {
    pub fn new(initial: Phase) -> Self {
        Self {
            active: Some(initial),
            pending: None,
        }
    }

    /// Fade every screen out now and schedule `target` to fade in after `fade_ms`.
    /// A request made while a fade is pending replaces it; only the latest target is shown.
    pub fn switch_to(&mut self, target: Phase, now: Millis, fade_ms: Millis, effects: &mut Vec<Effect>) {
        if let Some((previous, _)) = self.pending {
            log::debug!("screen: retargeting fade {:?} -> {:?}", previous, target);
        }
        self.active = None;
        self.pending = Some((target, Deadline::after(now, fade_ms)));
        effects.push(Effect::FadeOutAll);
    }

    /// Complete the pending fade once its delay has elapsed.
    pub fn tick(&mut self, now: Millis, effects: &mut Vec<Effect>) {
        let Some((target, deadline)) = self.pending else {
            return;
        };
        if deadline.is_due(now) {
            self.pending = None;
            self.active = Some(target);
            effects.push(Effect::HideAll);
            effects.push(Effect::ShowScreen(target));
        }
    }

    /// The fully visible screen, `None` mid-fade.
    pub fn active(&self) -> Option<Phase> {
        self.active
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }
}
