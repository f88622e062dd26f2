//! Turn progress bar.
//!
//! Width of the `.turn-indicator` child is `turn / max_turns` of the track.
//! Missing, unparseable or non-positive attributes fall back to turn 1 of 3,
//! so the bar never renders a non-finite width. Updates only write the
//! width when the turn actually moved.

#[cfg(test)]
#[path = "turn_test.rs"]
mod turn_test;

use crate::binding::{Binding, Ctx};
use crate::change::{Snapshot, diff, positive_or};
use crate::consts::{DEFAULT_MAX_TURNS, DEFAULT_TURN, MAX_TURNS_ATTR, TURN_ATTR, TURN_BAR_CLASS, TURN_BAR_TRANSITION_CLASSES};
use crate::dom::Dom;

pub const KIND: &str = "TurnProgress";

/// Bar width in percent, capped at 100.
#[must_use]
pub fn progress_percent(turn: u32, max_turns: u32) -> f64 {
    let max_turns = if max_turns == 0 { DEFAULT_MAX_TURNS } else { max_turns };
    (f64::from(turn) / f64::from(max_turns) * 100.0).min(100.0)
}

#[derive(Debug)]
pub struct TurnProgress {
    snapshot: Snapshot,
    max_turns: u32,
}

impl Default for TurnProgress {
    fn default() -> Self {
        Self { snapshot: Snapshot { turn: DEFAULT_TURN, ..Snapshot::default() }, max_turns: DEFAULT_MAX_TURNS }
    }
}

impl TurnProgress {
    fn read<D: Dom>(ctx: &Ctx<'_, D>) -> (u32, u32) {
        (
            positive_or(ctx.read(TURN_ATTR).as_deref(), DEFAULT_TURN),
            positive_or(ctx.read(MAX_TURNS_ATTR).as_deref(), DEFAULT_MAX_TURNS),
        )
    }

    fn render<D: Dom>(&self, ctx: &mut Ctx<'_, D>, animate: bool) {
        let Some(bar) = ctx.dom.find_first(ctx.el, TURN_BAR_CLASS) else {
            return;
        };
        if animate {
            ctx.dom.add_classes(&bar, &TURN_BAR_TRANSITION_CLASSES);
        }
        let width = progress_percent(self.snapshot.turn, self.max_turns);
        ctx.dom.set_style(&bar, "width", &format!("{width}%"));
    }
}

impl<D: Dom> Binding<D> for TurnProgress {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>) {
        let (turn, max_turns) = Self::read(ctx);
        self.snapshot.turn = turn;
        self.max_turns = max_turns;
        self.render(ctx, false);
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, D>) {
        let (turn, max_turns) = Self::read(ctx);
        self.max_turns = max_turns;
        let current = Snapshot { turn, ..self.snapshot.clone() };
        let (changes, next) = diff(&self.snapshot, current);
        self.snapshot = next;
        if changes.turn.is_some() {
            self.render(ctx, true);
        }
    }
}
