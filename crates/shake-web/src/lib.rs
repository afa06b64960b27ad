use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use shake_engine::Event;

pub mod browser;
pub mod runner;

pub use browser::BrowserHost;
pub use runner::{config_from_json, GameRunner};

thread_local! {
    static RUNNER: RefCell<Option<GameRunner<BrowserHost>>> = RefCell::new(None);
}

/// Run `f` against the live runner. Returns `None` (and logs) before `game_init()`
/// or if a browser callback arrives while the runner is already busy.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner<BrowserHost>) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::error!("shake-web: re-entrant call dropped");
            return None;
        };
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("shake-web: not initialized, call game_init() first");
                None
            }
        }
    })
}

fn deliver(event: Event) {
    with_runner(|r| r.push(event));
}

/// Create the session. `config_json` optionally overrides tuning (see `shake_engine::Config`).
#[wasm_bindgen]
pub fn game_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = config_from_json(config_json.as_deref());
    let capabilities = browser::detect_capabilities();
    let Some(host) = BrowserHost::new(deliver) else {
        log::error!("shake-web: no window or document");
        return;
    };
    host.bind_start_button();

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new(config, capabilities, host));
    });
    log::info!("shake-meter: initialized ({:?})", capabilities);
}

#[wasm_bindgen]
pub fn game_start() {
    let now = browser::now();
    with_runner(|r| r.start(now));
}

// ---- Manual input ----
//
// The bridge already prompts for motion permission and listens for
// `devicemotion` itself. These exports are for hosts that deliver those
// inputs some other way (a native shell, a replay harness, a desktop
// simulator). A page that calls them while the bridge's own listener is
// active feeds every sample twice.

/// Answer string from `DeviceMotionEvent.requestPermission()`, for hosts that prompt themselves.
/// Ignored unless the session is waiting on a prompt.
#[wasm_bindgen]
pub fn game_permission_result(answer: &str) {
    let now = browser::now();
    with_runner(|r| r.permission_answer(answer, now));
}

#[wasm_bindgen]
pub fn game_permission_error(message: &str) {
    let now = browser::now();
    with_runner(|r| r.permission_error(message, now));
}

/// Feed a motion sample from a host-owned source. Missing axes are `undefined`.
#[wasm_bindgen]
pub fn game_motion(x: Option<f64>, y: Option<f64>, z: Option<f64>, now: f64) {
    with_runner(|r| r.motion(x, y, z, now));
}

/// Call once per animation frame with the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn game_frame(now: f64) {
    with_runner(|r| r.frame(now));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| r.phase().code()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_score() -> f64 {
    with_runner(|r| r.score()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_percentage() -> f64 {
    with_runner(|r| r.percentage()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn is_listening() -> bool {
    with_runner(|r| r.is_listening()).unwrap_or(false)
}
