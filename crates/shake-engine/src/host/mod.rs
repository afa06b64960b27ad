//! Platform capability seam.
//!
//! The session emits `Effect`s; a host applies them through these traits.
//! The browser implementation lives in `shake-web`; tests use a recorder.

use crate::api::types::{ConfettiBurst, Effect, Phase};

/// Availability of a device capability, as detected by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    #[default]
    Available,
    Unavailable,
    PermissionDenied,
}

/// What the host detected before the first event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub motion: Capability,
    pub haptics: Capability,
    /// The platform requires a one-time user-granted motion permission.
    pub motion_permission_gate: bool,
}

/// Fire-and-forget vibration.
pub trait Haptics {
    fn vibrate(&mut self, pattern: &[u32]);
}

/// Screens, meter, and text outputs.
pub trait Surface {
    fn fade_out_all(&mut self);
    fn hide_all(&mut self);
    fn show_screen(&mut self, phase: Phase);
    fn set_countdown(&mut self, text: &str);
    fn set_meter(&mut self, fill_percent: f64, heart_scale: f64);
    fn set_status(&mut self, text: &str);
    fn set_shake_effect(&mut self, on: bool);
    fn alert(&mut self, message: &str);
}

pub trait ConfettiCannon {
    fn fire(&mut self, burst: &ConfettiBurst);
}

pub trait MotionSource {
    fn set_listening(&mut self, on: bool);
    fn request_permission(&mut self);
}

/// Everything a session needs from its platform.
pub trait Host: Haptics + Surface + ConfettiCannon + MotionSource {}

impl<T: Haptics + Surface + ConfettiCannon + MotionSource> Host for T {}

/// Apply effects to the host, in order.
pub fn dispatch<H: Host + ?Sized>(effects: &[Effect], host: &mut H) {
    for effect in effects {
        match effect {
            Effect::FadeOutAll => host.fade_out_all(),
            Effect::HideAll => host.hide_all(),
            Effect::ShowScreen(phase) => host.show_screen(*phase),
            Effect::SetCountdown(display) => host.set_countdown(&display.to_string()),
            Effect::ListenMotion(on) => host.set_listening(*on),
            Effect::RequestMotionPermission => host.request_permission(),
            Effect::SetMeter { fill_percent, heart_scale } => host.set_meter(*fill_percent, *heart_scale),
            Effect::SetStatus(text) => host.set_status(text),
            Effect::Vibrate(pattern) => host.vibrate(pattern),
            Effect::SetShakeEffect(on) => host.set_shake_effect(*on),
            Effect::Confetti(burst) => host.fire(burst),
            Effect::Alert(message) => host.alert(message),
        }
    }
}
