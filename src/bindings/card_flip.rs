//! Edge-triggered card flip.
//!
//! The flip class is applied when `data-flip` rises from absent/false to
//! `"true"`. A flag that stays true does not re-trigger; it has to fall
//! first. The class comes off after [`FLIP_MS`], unless a newer flip started
//! in the meantime, in which case the older timer leaves it alone.

#[cfg(test)]
#[path = "card_flip_test.rs"]
mod card_flip_test;

use crate::binding::{Binding, Ctx};
use crate::change::{Snapshot, diff, flag};
use crate::consts::{FLIP_ATTR, FLIP_CLASS, FLIP_MS};
use crate::dom::Dom;
use crate::schedule::{Generation, Task};

pub const KIND: &str = "CardFlip";

#[derive(Debug, Default)]
pub struct CardFlip {
    snapshot: Snapshot,
    flips: Generation,
}

impl CardFlip {
    fn flip<D: Dom>(&self, ctx: &mut Ctx<'_, D>) {
        ctx.dom.remove_class(ctx.el, FLIP_CLASS);
        ctx.dom.reflow(ctx.el);
        ctx.dom.add_class(ctx.el, FLIP_CLASS);

        let token = self.flips.advance();
        let flips = self.flips.clone();
        let el = ctx.el.clone();
        ctx.timers.after(
            FLIP_MS,
            Task::guarded(ctx.el.clone(), move |dom: &mut D| {
                if flips.is_current(token) {
                    dom.remove_class(&el, FLIP_CLASS);
                }
            }),
        );
    }
}

impl<D: Dom> Binding<D> for CardFlip {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>) {
        self.snapshot.flip = flag(ctx.read(FLIP_ATTR).as_deref());
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, D>) {
        let current = Snapshot { flip: flag(ctx.read(FLIP_ATTR).as_deref()), ..self.snapshot.clone() };
        let (changes, next) = diff(&self.snapshot, current);
        self.snapshot = next;
        if changes.flip_raised {
            self.flip(ctx);
        }
    }
}
