//! Staggered card entrances for the desk and the hand.
//!
//! Mount treats every card already rendered as new. After that, each update
//! diffs the card count: only the appended tail animates, and a shrinking
//! count resets the snapshot without animating anything. Each animated card
//! is marked with `data-animated` and never animates again, so replayed or
//! unrelated patches are no-ops.
//!
//! Cards in one batch start `stagger` milliseconds apart, so a batch reads as
//! a deal rather than a simultaneous pop-in.

#[cfg(test)]
#[path = "deal_test.rs"]
mod deal_test;

use crate::binding::{Binding, Ctx};
use crate::change::{CardDelta, Snapshot, diff};
use crate::consts::{
    ANIMATED_ATTR, DESK_CARD_CLASS, DESK_CONTAINER_CLASS, DESK_STAGGER_MS, ENTRANCE_ANIMATION, HAND_CARD_CLASS,
    HAND_STAGGER_MS,
};
use crate::dom::Dom;

pub const DESK_KIND: &str = "DeskCard";
pub const HAND_KIND: &str = "HandCards";

/// CSS `animation` value for the card at `index` within its batch.
#[must_use]
pub fn entrance_animation(index: usize, stagger_ms: u32) -> String {
    let delay_ms = u64::try_from(index).unwrap_or(u64::MAX).saturating_mul(u64::from(stagger_ms));
    format!("{ENTRANCE_ANIMATION} {delay_ms}ms both")
}

#[derive(Debug)]
pub struct Deal {
    card_class: &'static str,
    container_class: Option<&'static str>,
    stagger_ms: u32,
    snapshot: Snapshot,
}

impl Deal {
    /// Cards landing on the shared desk.
    #[must_use]
    pub fn desk() -> Self {
        Self {
            card_class: DESK_CARD_CLASS,
            container_class: Some(DESK_CONTAINER_CLASS),
            stagger_ms: DESK_STAGGER_MS,
            snapshot: Snapshot::default(),
        }
    }

    /// Cards dealt into the player's hand.
    #[must_use]
    pub fn hand() -> Self {
        Self { card_class: HAND_CARD_CLASS, container_class: None, stagger_ms: HAND_STAGGER_MS, snapshot: Snapshot::default() }
    }

    fn enter<D: Dom>(&self, ctx: &mut Ctx<'_, D>, cards: &[D::Node]) {
        let fresh: Vec<D::Node> =
            cards.iter().filter(|card| ctx.dom.attr(card, ANIMATED_ATTR).is_none()).cloned().collect();
        for (index, card) in fresh.iter().enumerate() {
            ctx.dom.set_style(card, "animation", "none");
            ctx.dom.reflow(card);
            ctx.dom.set_style(card, "animation", &entrance_animation(index, self.stagger_ms));
            ctx.dom.set_attr(card, ANIMATED_ATTR, "true");
        }
    }
}

pub fn desk_factory<D: Dom>() -> Box<dyn Binding<D>> {
    Box::new(Deal::desk())
}

pub fn hand_factory<D: Dom>() -> Box<dyn Binding<D>> {
    Box::new(Deal::hand())
}

impl<D: Dom> Binding<D> for Deal {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>) {
        if let Some(class) = self.container_class {
            ctx.dom.add_class(ctx.el, class);
        }
        let cards = ctx.dom.find_all(ctx.el, self.card_class);
        self.snapshot.cards = cards.len();
        self.enter(ctx, &cards);
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, D>) {
        let cards = ctx.dom.find_all(ctx.el, self.card_class);
        let current = Snapshot { cards: cards.len(), ..self.snapshot.clone() };
        let (changes, next) = diff(&self.snapshot, current);
        self.snapshot = next;
        match changes.cards {
            CardDelta::Appended { from, to } => self.enter(ctx, &cards[from..to]),
            CardDelta::Reset { count } => log::debug!("{} reset to {count} cards", self.card_class),
            CardDelta::Unchanged => {}
        }
    }
}
