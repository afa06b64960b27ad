use shake_engine::{
    dispatch, Capabilities, Config, Event, Host, Millis, MotionSample, PermissionOutcome, Phase,
    Session,
};

/// Parse the host-supplied config, falling back to defaults on any error.
pub fn config_from_json(json: Option<&str>) -> Config {
    match json {
        None => Config::default(),
        Some(json) => Config::from_json(json).unwrap_or_else(|err| {
            log::error!("shake-web: {}; using default config", err);
            Config::default()
        }),
    }
}

/// Wires a game session to a host: every event goes through the session and
/// the resulting effects are applied to the host before the call returns.
///
/// Generic over the host so the same runner drives the browser and test doubles.
pub struct GameRunner<H: Host> {
    session: Session,
    host: H,
}

impl<H: Host> GameRunner<H> {
    pub fn new(config: Config, capabilities: Capabilities, host: H) -> Self {
        Self {
            session: Session::new(config, capabilities),
            host,
        }
    }

    pub fn push(&mut self, event: Event) {
        let effects = self.session.handle(event);
        dispatch(&effects, &mut self.host);
    }

    pub fn start(&mut self, now: Millis) {
        self.push(Event::StartPressed { now });
    }

    /// The platform's permission answer; anything but `"granted"` is a refusal.
    pub fn permission_answer(&mut self, answer: &str, now: Millis) {
        let outcome = PermissionOutcome::from_answer(answer);
        self.push(Event::PermissionResolved { outcome, now });
    }

    pub fn permission_error(&mut self, message: &str, now: Millis) {
        let outcome = PermissionOutcome::Failed(message.to_string());
        self.push(Event::PermissionResolved { outcome, now });
    }

    pub fn motion(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>, now: Millis) {
        self.push(Event::Motion {
            sample: MotionSample { x, y, z },
            now,
        });
    }

    pub fn frame(&mut self, now: Millis) {
        self.push(Event::Frame { now });
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn score(&self) -> f64 {
        self.session.score()
    }

    pub fn percentage(&self) -> f64 {
        self.session.percentage()
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_listening()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
