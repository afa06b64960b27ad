use std::fmt;

/// Monotonic clock reading in milliseconds (the host's `performance.now()`).
pub type Millis = f64;

/// The four mutually exclusive screens of a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Wait,
    Countdown,
    Action,
    Reveal,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Wait, Phase::Countdown, Phase::Action, Phase::Reveal];

    /// The only phase this one may hand off to. `Reveal` is terminal.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Wait => Some(Phase::Countdown),
            Phase::Countdown => Some(Phase::Action),
            Phase::Action => Some(Phase::Reveal),
            Phase::Reveal => None,
        }
    }

    /// DOM id of the screen element for this phase.
    pub fn screen_id(self) -> &'static str {
        match self {
            Phase::Wait => "phase-wait",
            Phase::Countdown => "phase-countdown",
            Phase::Action => "phase-action",
            Phase::Reveal => "phase-reveal",
        }
    }

    /// Numeric code handed across the wasm boundary.
    pub fn code(self) -> u32 {
        match self {
            Phase::Wait => 0,
            Phase::Countdown => 1,
            Phase::Action => 2,
            Phase::Reveal => 3,
        }
    }
}

/// What the countdown screen displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownDisplay {
    Number(u32),
    Go,
}

impl fmt::Display for CountdownDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownDisplay::Number(n) => write!(f, "{}", n),
            CountdownDisplay::Go => f.write_str("GO!"),
        }
    }
}

/// One confetti emission, in the units the canvas-confetti API expects.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    /// Launch angle in degrees (90 = straight up).
    pub angle: f64,
    /// Spread in degrees.
    pub spread: f64,
    /// Horizontal origin, 0.0 (left edge) to 1.0 (right edge).
    pub origin_x: f64,
    /// CSS hex colors.
    pub colors: &'static [&'static str],
}

/// A platform side effect requested by the game session.
/// The session never touches the platform itself; the host applies these in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deactivate every screen (start of the cross-fade).
    FadeOutAll,
    /// Hide every screen (fade-out finished).
    HideAll,
    /// Unhide and activate exactly this screen.
    ShowScreen(Phase),
    SetCountdown(CountdownDisplay),
    /// Subscribe to (true) or unsubscribe from (false) device motion samples.
    ListenMotion(bool),
    RequestMotionPermission,
    /// Continuous presentation outputs: meter fill in percent, heart scale factor.
    SetMeter { fill_percent: f64, heart_scale: f64 },
    SetStatus(&'static str),
    /// Vibration pattern of alternating on/off durations in milliseconds.
    Vibrate(Vec<u32>),
    SetShakeEffect(bool),
    Confetti(ConfettiBurst),
    Alert(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_linear() {
        let mut seen = vec![Phase::Wait];
        let mut phase = Phase::Wait;
        while let Some(next) = phase.next() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(seen, Phase::ALL.to_vec());
        assert_eq!(Phase::Reveal.next(), None);
    }

    #[test]
    fn countdown_display_text() {
        assert_eq!(CountdownDisplay::Number(3).to_string(), "3");
        assert_eq!(CountdownDisplay::Go.to_string(), "GO!");
    }
}
