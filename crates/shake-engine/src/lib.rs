pub mod api;
pub mod core;
pub mod input;
pub mod systems;
pub mod host;

// Re-export key types at crate root for convenience
pub use api::config::{Config, ConfigError, PartnerConfig};
pub use api::types::{Millis, Phase, Effect, CountdownDisplay, ConfettiBurst};
pub use core::machine::{transition, Session, SessionState, Transition};
pub use core::time::{Deadline, Interval};
pub use input::event::{Event, MotionSample, PermissionOutcome};
pub use host::{
    dispatch, Capabilities, Capability, ConfettiCannon, Haptics, Host, MotionSource, Surface,
};
pub use systems::scorer::{shake_force, Score, SampleVerdict};
pub use systems::feedback::{Band, FeedbackEmitter};
pub use systems::rng::Rng;
