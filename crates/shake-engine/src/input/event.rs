use glam::DVec3;

use crate::api::types::Millis;

/// Acceleration-including-gravity reading. Hosts report missing axes as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// The full acceleration vector, or `None` if any axis is missing or not finite.
    pub fn vector(&self) -> Option<DVec3> {
        let v = DVec3::new(self.x?, self.y?, self.z?);
        v.is_finite().then_some(v)
    }
}

/// Result of the one-time motion permission prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    /// Any answer other than "granted".
    Refused,
    /// The prompt itself threw; carries the error text.
    Failed(String),
}

impl PermissionOutcome {
    /// Map the platform's answer string. Only the exact value `"granted"` grants.
    pub fn from_answer(answer: &str) -> Self {
        if answer == "granted" {
            PermissionOutcome::Granted
        } else {
            PermissionOutcome::Refused
        }
    }
}

/// Discrete callbacks delivered to a game session, one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The start button was clicked.
    StartPressed { now: Millis },
    PermissionResolved { outcome: PermissionOutcome, now: Millis },
    Motion { sample: MotionSample, now: Millis },
    /// Animation frame; drives every timer.
    Frame { now: Millis },
}

impl Event {
    pub fn now(&self) -> Millis {
        match self {
            Event::StartPressed { now }
            | Event::PermissionResolved { now, .. }
            | Event::Motion { now, .. }
            | Event::Frame { now } => *now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_axis_is_a_real_reading() {
        let s = MotionSample::new(0.0, 0.0, 9.81);
        assert_eq!(s.vector(), Some(DVec3::new(0.0, 0.0, 9.81)));
    }

    #[test]
    fn missing_axis_has_no_vector() {
        let s = MotionSample { x: None, y: Some(1.0), z: Some(1.0) };
        assert_eq!(s.vector(), None);
        let s = MotionSample { x: Some(1.0), y: Some(1.0), z: None };
        assert_eq!(s.vector(), None);
    }

    #[test]
    fn non_finite_axis_has_no_vector() {
        assert_eq!(MotionSample::new(f64::NAN, 0.0, 0.0).vector(), None);
        assert_eq!(MotionSample::new(0.0, f64::INFINITY, 0.0).vector(), None);
    }

    #[test]
    fn only_granted_grants() {
        assert_eq!(PermissionOutcome::from_answer("granted"), PermissionOutcome::Granted);
        assert_eq!(PermissionOutcome::from_answer("denied"), PermissionOutcome::Refused);
        assert_eq!(PermissionOutcome::from_answer("Granted"), PermissionOutcome::Refused);
        assert_eq!(PermissionOutcome::from_answer(""), PermissionOutcome::Refused);
    }
}
