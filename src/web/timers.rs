use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::WebDom;
use crate::schedule::{Scheduler, Task};

/// `setTimeout` / `requestAnimationFrame` scheduler.
///
/// Timers are fire-and-forget: nothing cancels them, and every task guards
/// itself against its element having left the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler<WebDom> for TimeoutScheduler {
    fn after(&mut self, delay_ms: u32, task: Task<WebDom>) {
        Timeout::new(delay_ms, move || task.run(&mut WebDom)).forget();
    }

    fn next_frame(&mut self, task: Task<WebDom>) {
        let Some(window) = web_sys::window() else {
            self.after(0, task);
            return;
        };
        let callback = Closure::once_into_js(move |_ts: f64| task.run(&mut WebDom));
        if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
            log::debug!("requestAnimationFrame failed: {err:?}");
        }
    }
}
