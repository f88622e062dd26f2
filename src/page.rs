//! Page-level named events.
//!
//! The host page dispatches these on `window` outside the patch stream, so no
//! bound element owns them. They carry no state: each is handled once and
//! forgotten.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde_json::Value;

use crate::consts::{ROUND_FLASH_ANIMATION, ROUND_FLASH_CLASSES, ROUND_FLASH_MS};
use crate::dom::Dom;
use crate::schedule::{Scheduler, Task};

pub const CARD_PLAYED: &str = "phx:card-played";
pub const ROUND_CHANGED: &str = "phx:round-changed";
pub const GAME_OVER: &str = "phx:game-over";

/// Every window event name the host should forward to [`PageEvent::parse`].
pub const PAGE_EVENTS: [&str; 3] = [CARD_PLAYED, ROUND_CHANGED, GAME_OVER];

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    CardPlayed { detail: Value },
    RoundChanged,
    GameOver { winner: Option<Value> },
}

impl PageEvent {
    /// Decode a window event by name; unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str, detail: &Value) -> Option<Self> {
        match name {
            CARD_PLAYED => Some(Self::CardPlayed { detail: detail.clone() }),
            ROUND_CHANGED => Some(Self::RoundChanged),
            GAME_OVER => Some(Self::GameOver { winner: detail.get("winner").filter(|w| truthy(w)).cloned() }),
            _ => {
                log::debug!("ignoring page event {name}");
                None
            }
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// React to one page event. Returns the overlay node when one was inserted.
pub fn handle<D: Dom>(dom: &mut D, timers: &mut dyn Scheduler<D>, event: &PageEvent) -> Option<D::Node> {
    match event {
        PageEvent::CardPlayed { detail } => {
            log::info!("card played: {detail}");
            None
        }
        PageEvent::RoundChanged => round_flash(dom, timers),
        PageEvent::GameOver { winner } => {
            if let Some(winner) = winner {
                log::info!("game over, winner: {winner}");
            }
            None
        }
    }
}

fn round_flash<D: Dom>(dom: &mut D, timers: &mut dyn Scheduler<D>) -> Option<D::Node> {
    let overlay = match dom.create("div") {
        Ok(overlay) => overlay,
        Err(err) => {
            log::debug!("round flash skipped: {err}");
            return None;
        }
    };
    dom.add_classes(&overlay, &ROUND_FLASH_CLASSES);
    dom.set_style(&overlay, "animation", ROUND_FLASH_ANIMATION);
    dom.append_to_body(&overlay);
    let expired = overlay.clone();
    timers.after(ROUND_FLASH_MS, Task::cleanup(move |dom: &mut D| dom.remove(&expired)));
    Some(overlay)
}
