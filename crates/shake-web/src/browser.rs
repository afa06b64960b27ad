//! Browser host: applies session effects through the DOM, `navigator.vibrate`,
//! the device-motion event, and the page's global `confetti` function.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DeviceMotionEvent, Document, Element, HtmlElement, Window};

use shake_engine::{
    Capabilities, Capability, ConfettiBurst, ConfettiCannon, Event, Haptics, Millis,
    MotionSample, MotionSource, PermissionOutcome, Phase, Surface,
};

const START_BUTTON_ID: &str = "start-btn";
const COUNTDOWN_TEXT_ID: &str = "countdown-text";
const STATUS_TEXT_ID: &str = "status-text";
const CLASS_ACTIVE: &str = "active";
const CLASS_HIDDEN: &str = "hidden";
const CLASS_SHAKE: &str = "shake-effect";

#[wasm_bindgen]
extern "C" {
    /// canvas-confetti, loaded by the page as a global.
    #[wasm_bindgen(catch, js_name = confetti)]
    fn confetti_js(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Where asynchronous browser callbacks deliver their events.
pub type EventSink = fn(Event);

type MotionListener = Closure<dyn FnMut(DeviceMotionEvent)>;

/// Monotonic clock shared by every event source.
pub fn now() -> Millis {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Feature-detect motion, the iOS-style permission gate, and vibration.
pub fn detect_capabilities() -> Capabilities {
    let global = js_sys::global();
    let motion_ctor = Reflect::get(&global, &JsValue::from_str("DeviceMotionEvent"))
        .unwrap_or(JsValue::UNDEFINED);
    let motion = if motion_ctor.is_undefined() {
        Capability::Unavailable
    } else {
        Capability::Available
    };
    let motion_permission_gate = !motion_ctor.is_undefined()
        && Reflect::get(&motion_ctor, &JsValue::from_str("requestPermission"))
            .map(|f| f.is_function())
            .unwrap_or(false);
    let haptics = match web_sys::window() {
        Some(w) if Reflect::has(&w.navigator(), &JsValue::from_str("vibrate")).unwrap_or(false) => {
            Capability::Available
        }
        _ => Capability::Unavailable,
    };
    Capabilities {
        motion,
        haptics,
        motion_permission_gate,
    }
}

fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub struct BrowserHost {
    window: Window,
    document: Document,
    sink: EventSink,
    motion_listener: Option<MotionListener>,
    /// A removed listener may still be on the stack (the winning sample), so it is dropped later.
    retired_listener: Option<MotionListener>,
    confetti_warned: bool,
}

impl BrowserHost {
    pub fn new(sink: EventSink) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            sink,
            motion_listener: None,
            retired_listener: None,
            confetti_warned: false,
        })
    }

    /// Route clicks on the start button into the session.
    pub fn bind_start_button(&self) {
        let Some(button) = self.document.get_element_by_id(START_BUTTON_ID) else {
            log::warn!("shake-web: #{} not found; call game_start() instead", START_BUTTON_ID);
            return;
        };
        let sink = self.sink;
        let on_click = Closure::<dyn FnMut()>::new(move || sink(Event::StartPressed { now: now() }));
        if let Err(err) = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            log::warn!("shake-web: could not bind start button: {}", describe(&err));
        }
        // Lives as long as the page.
        on_click.forget();
    }

    fn element(&self, id: &str) -> Option<Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("shake-web: #{} not found", id);
        }
        el
    }

    fn screens(&self) -> impl Iterator<Item = Element> + '_ {
        Phase::ALL
            .iter()
            .filter_map(|phase| self.document.get_element_by_id(phase.screen_id()))
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Haptics for BrowserHost {
    fn vibrate(&mut self, pattern: &[u32]) {
        let pattern: Array = pattern.iter().map(|&ms| JsValue::from(ms)).collect();
        self.window.navigator().vibrate_with_pattern(&pattern);
    }
}

impl Surface for BrowserHost {
    fn fade_out_all(&mut self) {
        for screen in self.screens() {
            let _ = screen.class_list().remove_1(CLASS_ACTIVE);
        }
    }

    fn hide_all(&mut self) {
        for screen in self.screens() {
            let _ = screen.class_list().add_1(CLASS_HIDDEN);
        }
    }

    fn show_screen(&mut self, phase: Phase) {
        let Some(screen) = self.element(phase.screen_id()) else {
            return;
        };
        let _ = screen.class_list().remove_1(CLASS_HIDDEN);
        // Force reflow so the fade-in transition runs from the hidden state.
        if let Some(html) = screen.dyn_ref::<HtmlElement>() {
            let _ = html.offset_width();
        }
        let _ = screen.class_list().add_1(CLASS_ACTIVE);
    }

    fn set_countdown(&mut self, text: &str) {
        self.set_text(COUNTDOWN_TEXT_ID, text);
    }

    fn set_meter(&mut self, fill_percent: f64, heart_scale: f64) {
        let Some(root) = self
            .document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let style = root.style();
        let _ = style.set_property("--meter-fill", &format!("{}%", fill_percent));
        let _ = style.set_property("--heart-scale", &heart_scale.to_string());
    }

    fn set_status(&mut self, text: &str) {
        self.set_text(STATUS_TEXT_ID, text);
    }

    fn set_shake_effect(&mut self, on: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let classes = body.class_list();
        let _ = if on {
            classes.add_1(CLASS_SHAKE)
        } else {
            classes.remove_1(CLASS_SHAKE)
        };
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

impl ConfettiCannon for BrowserHost {
    fn fire(&mut self, burst: &ConfettiBurst) {
        let options = Object::new();
        let origin = Object::new();
        let colors: Array = burst.colors.iter().map(|c| JsValue::from_str(c)).collect();
        let _ = Reflect::set(&origin, &"x".into(), &burst.origin_x.into());
        let _ = Reflect::set(&options, &"particleCount".into(), &burst.particle_count.into());
        let _ = Reflect::set(&options, &"angle".into(), &burst.angle.into());
        let _ = Reflect::set(&options, &"spread".into(), &burst.spread.into());
        let _ = Reflect::set(&options, &"origin".into(), &origin);
        let _ = Reflect::set(&options, &"colors".into(), &colors);

        if let Err(err) = confetti_js(&options) {
            if !self.confetti_warned {
                self.confetti_warned = true;
                log::warn!("shake-web: confetti unavailable: {}", describe(&err));
            }
        }
    }
}

impl MotionSource for BrowserHost {
    fn set_listening(&mut self, on: bool) {
        if on {
            if self.motion_listener.is_some() {
                return;
            }
            self.retired_listener = None;
            let sink = self.sink;
            let listener = MotionListener::new(move |event: DeviceMotionEvent| {
                let sample = match event.acceleration_including_gravity() {
                    Some(acc) => MotionSample { x: acc.x(), y: acc.y(), z: acc.z() },
                    None => MotionSample { x: None, y: None, z: None },
                };
                sink(Event::Motion { sample, now: now() });
            });
            if let Err(err) = self
                .window
                .add_event_listener_with_callback("devicemotion", listener.as_ref().unchecked_ref())
            {
                log::warn!("shake-web: could not listen for devicemotion: {}", describe(&err));
            }
            self.motion_listener = Some(listener);
        } else if let Some(listener) = self.motion_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("devicemotion", listener.as_ref().unchecked_ref());
            self.retired_listener = Some(listener);
        }
    }

    fn request_permission(&mut self) {
        let request = || -> Result<Promise, JsValue> {
            let ctor = Reflect::get(&js_sys::global(), &"DeviceMotionEvent".into())?;
            let request: Function = Reflect::get(&ctor, &"requestPermission".into())?.dyn_into()?;
            Ok(request.call0(&ctor)?.dyn_into::<Promise>()?)
        };
        // A synchronous failure is still reported asynchronously: the runner is
        // mid-dispatch and cannot take the event now.
        let promise = request().unwrap_or_else(|err| Promise::reject(&err));

        let sink = self.sink;
        let on_answer = Closure::<dyn FnMut(JsValue)>::new(move |answer: JsValue| {
            let answer = answer.as_string().unwrap_or_default();
            sink(Event::PermissionResolved {
                outcome: PermissionOutcome::from_answer(&answer),
                now: now(),
            });
        });
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
            sink(Event::PermissionResolved {
                outcome: PermissionOutcome::Failed(describe(&err)),
                now: now(),
            });
        });
        let _ = promise.then2(&on_answer, &on_error);
        // One pair per prompt; the prompt is shown at most once per click.
        on_answer.forget();
        on_error.forget();
    }
}
