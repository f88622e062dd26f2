//! Full-viewport colour flash on `game_flash` server pushes.

#[cfg(test)]
#[path = "game_flash_test.rs"]
mod game_flash_test;

use serde::Deserialize;
use serde_json::Value;

use crate::binding::{Binding, Ctx};
use crate::consts::{FALLBACK_SLACK_MS, FLASH_MS, FLASH_Z_INDEX, GAME_FLASH_EVENT};
use crate::dom::{Dom, Keyframe, Timing};
use crate::schedule::{Scheduler, Task};

pub const KIND: &str = "GameFlash";

/// Flash treatment selected by the push's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Win,
    Lose,
    Round,
    Turn,
}

impl FlashKind {
    /// Map a tag to a kind; anything unrecognised gets the turn treatment.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("win") => Self::Win,
            Some("lose") => Self::Lose,
            Some("round") => Self::Round,
            Some("turn") => Self::Turn,
            other => {
                log::debug!("game flash: unrecognised type {other:?}, using default");
                Self::Turn
            }
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Win => "rgba(34, 197, 94, 0.2)",
            Self::Lose => "rgba(239, 68, 68, 0.2)",
            Self::Round => "rgba(59, 130, 246, 0.2)",
            Self::Turn => "rgba(168, 85, 247, 0.1)",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FlashPayload {
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Cover the viewport with `kind`'s colour and fade it out over [`FLASH_MS`].
///
/// The overlay goes away when its fade finishes, and in any case when the
/// fixed timeout fires shortly after the fade would have ended. Returns the overlay, or `None` if it could not be created.
pub fn flash<D: Dom>(dom: &mut D, timers: &mut dyn Scheduler<D>, kind: FlashKind) -> Option<D::Node> {
    let overlay = match dom.create("div") {
        Ok(overlay) => overlay,
        Err(err) => {
            log::debug!("game flash skipped: {err}");
            return None;
        }
    };
    for (prop, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("background", kind.color()),
        ("pointer-events", "none"),
        ("z-index", FLASH_Z_INDEX),
    ] {
        dom.set_style(&overlay, prop, value);
    }
    dom.append_to_body(&overlay);

    let keyframes = [Keyframe::new().with("opacity", "1"), Keyframe::new().with("opacity", "0")];
    let timing = Timing { duration_ms: f64::from(FLASH_MS), easing: "ease-out" };
    let finished = overlay.clone();
    let on_finish = Box::new(move |dom: &mut D| dom.remove(&finished));
    if let Err(err) = dom.animate(&overlay, &keyframes, timing, on_finish) {
        log::debug!("game flash without fade: {err}");
    }
    let expired = overlay.clone();
    timers.after(FLASH_MS + FALLBACK_SLACK_MS, Task::cleanup(move |dom: &mut D| dom.remove(&expired)));
    Some(overlay)
}

#[derive(Debug, Default)]
pub struct GameFlash;

impl<D: Dom> Binding<D> for GameFlash {
    fn on_mount(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn on_update(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn server_events(&self) -> &'static [&'static str] {
        &[GAME_FLASH_EVENT]
    }

    fn on_server_event(&mut self, ctx: &mut Ctx<'_, D>, name: &str, payload: &Value) {
        if name != GAME_FLASH_EVENT {
            return;
        }
        let payload = FlashPayload::deserialize(payload).unwrap_or_else(|err| {
            log::debug!("game flash payload unreadable: {err}");
            FlashPayload::default()
        });
        flash(ctx.dom, ctx.timers, FlashKind::from_tag(payload.kind.as_deref()));
    }
}
