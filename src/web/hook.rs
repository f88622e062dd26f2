use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, MouseEvent};

use super::{TimeoutScheduler, WebDom, js_to_json, json_to_js};
use crate::binding::{BoundElement, Env, Input, Interaction, Outbound, Registry};
use crate::error::FxError;

thread_local! {
    pub(super) static REGISTRY: Registry<WebDom> = Registry::standard();
    static RNG: RefCell<StdRng> = RefCell::new(seeded_rng());
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits())
}

fn fx_err(err: FxError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Outbound sink backed by the hook's `pushEvent`.
struct HookPush {
    hook: JsValue,
}

impl HookPush {
    fn send(&self, event: &str, payload: &Value) -> Result<JsValue, JsValue> {
        let push = Reflect::get(&self.hook, &JsValue::from_str("pushEvent"))?.dyn_into::<Function>()?;
        push.call2(&self.hook, &JsValue::from_str(event), &json_to_js(payload)?)
    }
}

impl Outbound for HookPush {
    fn push_event(&mut self, event: &str, payload: Value) {
        if let Err(err) = self.send(event, &payload) {
            log::debug!("pushEvent {event} failed: {err:?}");
        }
    }
}

/// Run `f` with the browser's services.
fn with_env<R>(hook: &JsValue, f: impl FnOnce(&mut Env<'_, WebDom>) -> R) -> R {
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        let mut outbound = HookPush { hook: hook.clone() };
        let mut env = Env { dom: &mut WebDom, timers: &mut TimeoutScheduler, outbound: &mut outbound, rng: &mut *rng };
        f(&mut env)
    })
}

/// Route one call into the bound element, unless a callback for it is still running.
fn dispatch(
    bound: &RefCell<BoundElement<WebDom>>,
    hook: &JsValue,
    f: impl FnOnce(&mut BoundElement<WebDom>, &mut Env<'_, WebDom>),
) {
    match bound.try_borrow_mut() {
        Ok(mut bound) => with_env(hook, |env| f(&mut bound, env)),
        Err(_) => log::warn!("re-entrant callback dropped"),
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// One mounted hook: the bound element plus the listeners it registered.
#[wasm_bindgen]
pub struct BoundHook {
    hook: JsValue,
    bound: Rc<RefCell<BoundElement<WebDom>>>,
    listeners: Vec<(Element, &'static str, Listener)>,
    server_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl BoundHook {
    /// Bind `hook.el` to the binding registered as `kind` and run its mount.
    pub fn mount(kind: &str, hook: JsValue) -> Result<BoundHook, JsValue> {
        let el = Reflect::get(&hook, &JsValue::from_str("el"))?.dyn_into::<Element>()?;
        let bound = REGISTRY.with(|registry| registry.bind(kind, el.clone())).map_err(fx_err)?;
        let bound = Rc::new(RefCell::new(bound));
        let mut mounted = Self { hook, bound, listeners: Vec::new(), server_handlers: Vec::new() };

        let mount_result = with_env(&mounted.hook, |env| mounted.bound.borrow_mut().mount(env));
        mount_result.map_err(fx_err)?;

        let interactions = mounted.bound.borrow().interactions();
        for &interaction in interactions {
            mounted.listen(&el, interaction)?;
        }
        let server_events = mounted.bound.borrow().server_events();
        for &name in server_events {
            mounted.handle_event(name)?;
        }
        Ok(mounted)
    }

    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.bound.borrow().kind().to_owned()
    }

    pub fn updated(&self) {
        dispatch(&self.bound, &self.hook, |bound, env| {
            if let Err(err) = bound.update(env) {
                log::warn!("{err}");
            }
        });
    }

    /// Detach listeners and drop the binding's snapshot.
    pub fn destroyed(self) {
        for (el, event, listener) in &self.listeners {
            if let Err(err) = el.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref()) {
                log::debug!("removeEventListener {event} failed: {err:?}");
            }
        }
        log::debug!(
            "{} destroyed, releasing {} server event handlers",
            self.bound.borrow().kind(),
            self.server_handlers.len()
        );
    }
}

impl BoundHook {
    fn listen(&mut self, el: &Element, interaction: Interaction) -> Result<(), JsValue> {
        let bound = Rc::clone(&self.bound);
        let hook = self.hook.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let input = match interaction {
                Interaction::Click => Input::Click,
                Interaction::PointerLeave => Input::PointerLeave,
                Interaction::PointerMove => {
                    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    Input::PointerMove { x: f64::from(mouse.client_x()), y: f64::from(mouse.client_y()) }
                }
            };
            dispatch(&bound, &hook, |bound, env| bound.input(env, input));
        }) as Box<dyn FnMut(Event)>);

        let event = interaction.event_name();
        el.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        self.listeners.push((el.clone(), event, listener));
        Ok(())
    }

    fn handle_event(&mut self, name: &'static str) -> Result<(), JsValue> {
        let bound = Rc::clone(&self.bound);
        let hook = self.hook.clone();
        let handler = Closure::wrap(Box::new(move |payload: JsValue| {
            let payload = js_to_json(&payload);
            dispatch(&bound, &hook, |bound, env| bound.server_event(env, name, &payload));
        }) as Box<dyn FnMut(JsValue)>);

        let register = Reflect::get(&self.hook, &JsValue::from_str("handleEvent"))?.dyn_into::<Function>()?;
        register.call2(&self.hook, &JsValue::from_str(name), handler.as_ref())?;
        self.server_handlers.push(handler);
        Ok(())
    }
}
