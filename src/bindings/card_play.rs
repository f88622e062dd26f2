//! Card play: press feedback and a clone that flies toward the desk.
//!
//! On click the source card shrinks and dims immediately, and a deep clone
//! is lifted into a fixed-position layer on the body. On the next frame the
//! clone translates toward the desk region and fades. The flight deltas are
//! computed once, at click time, from the card's rect and the viewport.
//!
//! The clone is removed by a fixed timeout, never by a transition event, so
//! it cannot leak even when the page drops the transition. The press
//! feedback reverts on the same timeout if the card is still attached.

#[cfg(test)]
#[path = "card_play_test.rs"]
mod card_play_test;

use crate::binding::{Binding, Ctx, Input, Interaction};
use crate::consts::{
    CARD_PLAY_MS, CLONE_Z_INDEX, DESK_CARD_CLASS, FLIGHT_TARGET_Y_RATIO, FLIGHT_TRANSITION, PRESSED_CLASSES,
};
use crate::dom::{Dom, Rect, Viewport};
use crate::schedule::{Generation, Task};

pub const KIND: &str = "CardPlay";

/// Start box of the flying clone and the offset to its landing spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPath {
    pub start: Rect,
    pub dx: f64,
    pub dy: f64,
}

impl FlightPath {
    /// Final transform of the clone.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px) scale(1.1) rotateY(10deg)", self.dx, self.dy)
    }
}

/// Flight from `start` to the horizontally centred desk slot at 35% height.
#[must_use]
pub fn flight_path(start: Rect, viewport: Viewport) -> FlightPath {
    let target_left = viewport.width / 2.0 - start.width / 2.0;
    let target_top = viewport.height * FLIGHT_TARGET_Y_RATIO;
    FlightPath { start, dx: target_left - start.left, dy: target_top - start.top }
}

#[derive(Debug, Default)]
pub struct CardPlay {
    presses: Generation,
}

impl CardPlay {
    fn play<D: Dom>(&mut self, ctx: &mut Ctx<'_, D>) {
        ctx.dom.add_classes(ctx.el, &PRESSED_CLASSES);
        let token = self.presses.advance();

        let card = ctx.dom.find_first(ctx.el, DESK_CARD_CLASS).unwrap_or_else(|| ctx.el.clone());
        let path = flight_path(ctx.dom.rect(&card), ctx.dom.viewport());
        let clone = match ctx.dom.clone_deep(&card) {
            Ok(clone) => Some(clone),
            Err(err) => {
                log::debug!("card play without flight: {err}");
                None
            }
        };

        if let Some(clone) = &clone {
            launch(ctx, clone, &path);
        }

        let presses = self.presses.clone();
        let el = ctx.el.clone();
        let mut revert = Task::guarded(ctx.el.clone(), move |dom: &mut D| {
            if presses.is_current(token) {
                dom.remove_classes(&el, &PRESSED_CLASSES);
            }
        });
        if let Some(clone) = clone {
            revert = revert.and_cleanup(move |dom: &mut D| dom.remove(&clone));
        }
        ctx.timers.after(CARD_PLAY_MS, revert);
    }
}

fn launch<D: Dom>(ctx: &mut Ctx<'_, D>, clone: &D::Node, path: &FlightPath) {
    let start = path.start;
    for (prop, value) in [
        ("position", "fixed".to_owned()),
        ("top", format!("{}px", start.top)),
        ("left", format!("{}px", start.left)),
        ("width", format!("{}px", start.width)),
        ("height", format!("{}px", start.height)),
        ("z-index", CLONE_Z_INDEX.to_owned()),
        ("pointer-events", "none".to_owned()),
        ("transition", FLIGHT_TRANSITION.to_owned()),
    ] {
        ctx.dom.set_style(clone, prop, &value);
    }
    ctx.dom.append_to_body(clone);

    let flying = clone.clone();
    let transform = path.transform();
    ctx.timers.next_frame(Task::guarded(clone.clone(), move |dom: &mut D| {
        dom.set_style(&flying, "transform", &transform);
        dom.set_style(&flying, "opacity", "0");
    }));
}

impl<D: Dom> Binding<D> for CardPlay {
    fn on_mount(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn on_update(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn interactions(&self) -> &'static [Interaction] {
        &[Interaction::Click]
    }

    fn on_input(&mut self, ctx: &mut Ctx<'_, D>, input: Input) {
        if input == Input::Click {
            self.play(ctx);
        }
    }
}
