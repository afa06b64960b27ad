//! The game session state machine.
//!
//! `transition` is pure: it takes the current session record and one event and
//! returns the next record plus the effects the host must apply. `Session` owns
//! a record and threads events through `transition`.

use crate::api::config::Config;
use crate::api::types::{Effect, Millis, Phase};
use crate::host::{Capabilities, Capability};
use crate::input::event::{Event, MotionSample, PermissionOutcome};
use crate::systems::confetti::ConfettiLoop;
use crate::systems::countdown::{Countdown, CountdownStep};
use crate::systems::feedback::{self, FeedbackEmitter, CLIMAX_PATTERN};
use crate::systems::partner::PracticePartner;
use crate::systems::scorer::{self, SampleVerdict, Score};
use crate::systems::screen::ScreenController;

pub const PERMISSION_ALERT: &str = "Motion permission is required to play!";

/// Explicit record of one play-through.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    phase: Phase,
    score: Score,
    capabilities: Capabilities,
    screen: ScreenController,
    countdown: Option<Countdown>,
    feedback: FeedbackEmitter,
    confetti: Option<ConfettiLoop>,
    partner: Option<PracticePartner>,
    listening: bool,
    permission_pending: bool,
}

/// Output of one `transition`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

/// Compute the next state and effects for `event`. Events that make no sense
/// in the current phase leave the state unchanged and produce no effects.
pub fn transition(state: &SessionState, config: &Config, event: &Event) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();
    next.apply(config, event, &mut effects);
    Transition { state: next, effects }
}

impl SessionState {
    pub fn new(config: &Config, capabilities: Capabilities) -> Self {
        Self {
            phase: Phase::Wait,
            score: Score::new(config.max_score),
            capabilities,
            screen: ScreenController::new(Phase::Wait),
            countdown: None,
            feedback: FeedbackEmitter::new(),
            confetti: None,
            partner: None,
            listening: false,
            permission_pending: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The fully visible screen, `None` mid-fade.
    pub fn visible_screen(&self) -> Option<Phase> {
        self.screen.active()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_permission_pending(&self) -> bool {
        self.permission_pending
    }

    pub fn is_confetti_running(&self) -> bool {
        self.confetti.as_ref().is_some_and(ConfettiLoop::is_running)
    }

    fn apply(&mut self, config: &Config, event: &Event, effects: &mut Vec<Effect>) {
        match event {
            Event::StartPressed { now } => self.on_start(config, *now, effects),
            Event::PermissionResolved { outcome, now } => {
                self.on_permission(config, outcome, *now, effects)
            }
            Event::Motion { sample, now } => self.on_motion(config, sample, *now, effects),
            Event::Frame { now } => self.on_frame(config, *now, effects),
        }
    }

    fn on_start(&mut self, config: &Config, now: Millis, effects: &mut Vec<Effect>) {
        if self.phase != Phase::Wait || self.permission_pending {
            log::debug!("start ignored in {:?} (pending={})", self.phase, self.permission_pending);
            return;
        }
        match self.capabilities.motion {
            Capability::PermissionDenied => {
                effects.push(Effect::Alert(PERMISSION_ALERT.to_string()));
                return;
            }
            Capability::Unavailable => {
                log::warn!("motion sensing unavailable; starting anyway");
            }
            Capability::Available => {}
        }
        if self.capabilities.motion_permission_gate {
            self.permission_pending = true;
            effects.push(Effect::RequestMotionPermission);
            return;
        }
        self.enter_countdown(config, now, effects);
    }

    fn on_permission(
        &mut self,
        config: &Config,
        outcome: &PermissionOutcome,
        now: Millis,
        effects: &mut Vec<Effect>,
    ) {
        if !self.permission_pending {
            log::debug!("permission result ignored: no request pending");
            return;
        }
        self.permission_pending = false;
        match outcome {
            PermissionOutcome::Granted => {
                self.capabilities.motion = Capability::Available;
                self.enter_countdown(config, now, effects);
            }
            PermissionOutcome::Refused => {
                log::info!("motion permission refused");
                effects.push(Effect::Alert(PERMISSION_ALERT.to_string()));
            }
            PermissionOutcome::Failed(message) => {
                log::error!("motion permission request failed: {}", message);
                self.enter_countdown(config, now, effects);
            }
        }
    }

    fn on_motion(&mut self, config: &Config, sample: &MotionSample, now: Millis, effects: &mut Vec<Effect>) {
        if self.phase != Phase::Action || !self.listening {
            return;
        }
        match scorer::evaluate(sample, config.gravity, config.noise_threshold) {
            SampleVerdict::Accepted(force) => self.add_score(config, force, now, effects),
            SampleVerdict::Noise(force) => log::trace!("motion: noise {:.2}", force),
            SampleVerdict::Malformed => log::trace!("motion: malformed sample discarded"),
        }
    }

    fn on_frame(&mut self, config: &Config, now: Millis, effects: &mut Vec<Effect>) {
        self.screen.tick(now, effects);
        self.feedback.tick(now, effects);

        if let Some(countdown) = &mut self.countdown {
            let mut finished = false;
            for step in countdown.tick(now) {
                match step {
                    CountdownStep::Show(display) => effects.push(Effect::SetCountdown(display)),
                    CountdownStep::Finished => finished = true,
                }
            }
            if finished {
                self.countdown = None;
                self.enter_action(config, now, effects);
            }
        }

        // Runs before the partner so a partner win starts the loop without a second frame.
        if let Some(confetti) = &mut self.confetti {
            confetti.frame(now, effects);
        }

        if self.phase == Phase::Action {
            let amounts = self.partner.as_mut().map(|p| p.poll(now)).unwrap_or_default();
            for amount in amounts {
                if self.phase != Phase::Action {
                    break;
                }
                self.add_score(config, amount, now, effects);
            }
        }
    }

    fn advance_to(&mut self, target: Phase) {
        debug_assert_eq!(self.phase.next(), Some(target), "illegal phase transition");
        log::info!("phase: {:?} -> {:?}", self.phase, target);
        self.phase = target;
    }

    fn enter_countdown(&mut self, config: &Config, now: Millis, effects: &mut Vec<Effect>) {
        self.advance_to(Phase::Countdown);
        self.screen.switch_to(Phase::Countdown, now, config.fade_ms, effects);
        let countdown = Countdown::start(config.countdown_start, now, config.countdown_interval_ms);
        effects.push(Effect::SetCountdown(countdown.initial_display()));
        self.countdown = Some(countdown);
    }

    fn enter_action(&mut self, config: &Config, now: Millis, effects: &mut Vec<Effect>) {
        self.advance_to(Phase::Action);
        self.screen.switch_to(Phase::Action, now, config.fade_ms, effects);
        self.listening = true;
        effects.push(Effect::ListenMotion(true));
        self.partner = config.partner.as_ref().map(|p| PracticePartner::new(p, now));
    }

    fn add_score(&mut self, config: &Config, amount: f64, now: Millis, effects: &mut Vec<Effect>) {
        let update = self.score.add(amount);
        let percentage = self.score.percentage();
        if update.reached_max {
            self.enter_reveal(config, now, effects);
            // The climax vibration must not be overridden by band feedback.
            effects.push(feedback::meter(percentage));
        } else {
            let haptics = self.capabilities.haptics == Capability::Available;
            self.feedback.publish(percentage, now, config, haptics, effects);
        }
    }

    fn enter_reveal(&mut self, config: &Config, now: Millis, effects: &mut Vec<Effect>) {
        log::debug!("meter full at score {}", self.score.value());
        self.listening = false;
        self.partner = None;
        effects.push(Effect::ListenMotion(false));
        if self.capabilities.haptics == Capability::Available {
            effects.push(Effect::Vibrate(CLIMAX_PATTERN.to_vec()));
        }
        self.advance_to(Phase::Reveal);
        self.screen.switch_to(Phase::Reveal, now, config.fade_ms, effects);
        self.confetti = Some(ConfettiLoop::start(now, config.confetti_ms, effects));
    }
}

/// Owns one session record and its config.
pub struct Session {
    state: SessionState,
    config: Config,
}

impl Session {
    pub fn new(config: Config, capabilities: Capabilities) -> Self {
        let state = SessionState::new(&config, capabilities);
        Self { state, config }
    }

    /// Feed one event; returns the effects to apply, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let Transition { state, effects } = transition(&self.state, &self.config, &event);
        self.state = state;
        effects
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> f64 {
        self.state.score.value()
    }

    pub fn percentage(&self) -> f64 {
        self.state.score.percentage()
    }

    pub fn is_listening(&self) -> bool {
        self.state.listening
    }
}
