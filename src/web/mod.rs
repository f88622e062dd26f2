//! Browser backend, compiled with the `browser` feature.
//!
//! [`WebDom`] and [`TimeoutScheduler`] implement the core capabilities on
//! `web-sys` and `gloo-timers`. [`BoundHook`] is the object the page's hook
//! table forwards lifecycle callbacks to, and [`boot`] wires logging, page
//! events and the live connection.

mod boot;
mod dom;
mod hook;
mod timers;

pub use boot::{boot, connection_options, install_connection, kinds, live_path};
pub use dom::WebDom;
pub use hook::BoundHook;
pub use timers::TimeoutScheduler;

use js_sys::JSON;
use serde_json::Value;
use wasm_bindgen::JsValue;

/// Copy a JS value into JSON. `undefined` and values `JSON.stringify` rejects become `null`.
pub(crate) fn js_to_json(value: &JsValue) -> Value {
    let text = match JSON::stringify(value).map(|text| text.as_string()) {
        Ok(Some(text)) => text,
        Ok(None) => return Value::Null,
        Err(err) => {
            log::debug!("payload not serialisable: {err:?}");
            return Value::Null;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("payload not valid JSON: {err}");
            Value::Null
        }
    }
}

pub(crate) fn json_to_js(value: &Value) -> Result<JsValue, JsValue> {
    JSON::parse(&value.to_string())
}
