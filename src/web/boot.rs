use std::cell::Cell;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Event};

use super::hook::REGISTRY;
use super::{TimeoutScheduler, WebDom, js_to_json, json_to_js};
use crate::connection::{self, Connection, ConnectionConfig, LiveSocket};
use crate::page::{self, PAGE_EVENTS, PageEvent};

thread_local! {
    static BOOTED: Cell<bool> = const { Cell::new(false) };
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    match document.query_selector(&format!("meta[name='{name}']")) {
        Ok(Some(meta)) => meta.get_attribute("content"),
        Ok(None) => None,
        Err(err) => {
            log::debug!("meta lookup {name} failed: {err:?}");
            None
        }
    }
}

fn page_config() -> ConnectionConfig {
    ConnectionConfig::from_meta(meta_content)
}

/// Initialise logging and page-level listeners. Later calls do nothing.
#[wasm_bindgen]
pub fn boot() {
    if BOOTED.with(|booted| booted.replace(true)) {
        return;
    }
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already set: {err}")));
    }

    let config = page_config();
    log::info!("card fx booted; live path {}, long-poll fallback {} ms", config.path, config.long_poll_fallback_ms);

    let Some(window) = web_sys::window() else {
        log::warn!("no window; page events not wired");
        return;
    };
    for name in PAGE_EVENTS {
        let listener = Closure::wrap(Box::new(move |event: Event| {
            let detail = event.dyn_ref::<CustomEvent>().map_or(serde_json::Value::Null, |custom| js_to_json(&custom.detail()));
            if let Some(event) = PageEvent::parse(name, &detail) {
                page::handle(&mut WebDom, &mut TimeoutScheduler, &event);
            }
        }) as Box<dyn FnMut(Event)>);
        match window.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
            Ok(()) => listener.forget(),
            Err(err) => log::warn!("could not listen for {name}: {err:?}"),
        }
    }
}

/// Registered binding kinds, for building the page's hook table.
#[wasm_bindgen]
pub fn kinds() -> Array {
    REGISTRY.with(|registry| registry.kinds().map(JsValue::from_str).collect())
}

/// Options object for the live socket constructor.
#[wasm_bindgen(js_name = connectionOptions)]
pub fn connection_options() -> Result<JsValue, JsValue> {
    json_to_js(&page_config().socket_options())
}

#[wasm_bindgen(js_name = livePath)]
pub fn live_path() -> String {
    page_config().path
}

/// The page's `LiveSocket` instance.
struct JsLiveSocket(JsValue);

impl JsLiveSocket {
    fn call(&self, method: &str) -> Result<JsValue, JsValue> {
        let function = Reflect::get(&self.0, &JsValue::from_str(method))?.dyn_into::<Function>()?;
        function.call0(&self.0)
    }
}

impl LiveSocket for JsLiveSocket {
    fn connect(&self) {
        if let Err(err) = self.call("connect") {
            log::warn!("live socket connect failed: {err:?}");
        }
    }

    fn is_connected(&self) -> bool {
        match self.call("isConnected") {
            Ok(connected) => connected.as_bool().unwrap_or(false),
            Err(_) => false,
        }
    }
}

/// Install `socket` as the page's connection, connect it and expose it as
/// `window.liveSocket`.
#[wasm_bindgen(js_name = installConnection)]
pub fn install_connection(socket: JsValue) -> Result<(), JsValue> {
    let connection = connection::install(Connection::new(page_config(), JsLiveSocket(socket.clone())))
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    connection.connect();
    if let Some(window) = web_sys::window() {
        Reflect::set(&window, &JsValue::from_str("liveSocket"), &socket)?;
    }
    Ok(())
}
