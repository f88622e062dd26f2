//! Round indicator pulse and `round_changed` notification.

#[cfg(test)]
#[path = "round_test.rs"]
mod round_test;

use serde_json::json;

use crate::binding::{Binding, Ctx};
use crate::change::{RoundValue, Snapshot, diff};
use crate::consts::{ROUND_ATTR, ROUND_CHANGED_EVENT, ROUND_INDICATOR_CLASS, ROUND_PULSE_CLASS, ROUND_PULSE_MS};
use crate::dom::Dom;
use crate::schedule::{Generation, Task};

pub const KIND: &str = "RoundIndicator";

/// Records the round on mount; pulses and notifies the server on every later
/// change of value.
#[derive(Debug, Default)]
pub struct RoundIndicator {
    snapshot: Snapshot,
    pulses: Generation,
}

impl RoundIndicator {
    fn pulse<D: Dom>(&self, ctx: &mut Ctx<'_, D>, round: &RoundValue) {
        // Re-adding the class only restarts the CSS animation after a layout.
        ctx.dom.remove_class(ctx.el, ROUND_PULSE_CLASS);
        ctx.dom.reflow(ctx.el);
        ctx.dom.add_class(ctx.el, ROUND_PULSE_CLASS);

        ctx.outbound.push_event(ROUND_CHANGED_EVENT, json!({ "round": round.to_json() }));

        let token = self.pulses.advance();
        let pulses = self.pulses.clone();
        let el = ctx.el.clone();
        ctx.timers.after(
            ROUND_PULSE_MS,
            Task::guarded(ctx.el.clone(), move |dom: &mut D| {
                if pulses.is_current(token) {
                    dom.remove_class(&el, ROUND_PULSE_CLASS);
                }
            }),
        );
    }
}

impl<D: Dom> Binding<D> for RoundIndicator {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>) {
        self.snapshot.round = RoundValue::from_attr(ctx.read(ROUND_ATTR));
        ctx.dom.add_class(ctx.el, ROUND_INDICATOR_CLASS);
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, D>) {
        let current = Snapshot { round: RoundValue::from_attr(ctx.read(ROUND_ATTR)), ..self.snapshot.clone() };
        let (changes, next) = diff(&self.snapshot, current);
        self.snapshot = next;
        if let Some(round) = changes.round {
            self.pulse(ctx, &round);
        }
    }
}
