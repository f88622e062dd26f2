//! Deferred effects.
//!
//! Every timer a binding starts is a [`Task`]: an optional guard node, an
//! effect that runs only while the guard is still in the document, and a
//! cleanup that always runs. Bindings hand tasks to a [`Scheduler`]; the
//! browser backend maps them onto `setTimeout`/`requestAnimationFrame`,
//! and [`crate::headless::ManualScheduler`] runs them on a virtual clock.
//!
//! A [`Generation`] latch lets a binding invalidate its own pending tasks:
//! when a later update restarts an effect, the earlier timer still fires
//! but sees a stale token and leaves the newer state alone.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::Dom;

pub type DomFn<D> = Box<dyn FnOnce(&mut D)>;

/// A deferred effect with an element guard and an unconditional cleanup.
pub struct Task<D: Dom> {
    guard: Option<D::Node>,
    effect: Option<DomFn<D>>,
    cleanup: Option<DomFn<D>>,
}

impl<D: Dom> Task<D> {
    /// Run `effect` later, but only if `node` is still attached at that point.
    pub fn guarded(node: D::Node, effect: impl FnOnce(&mut D) + 'static) -> Self {
        Self { guard: Some(node), effect: Some(Box::new(effect)), cleanup: None }
    }

    /// Run `cleanup` later no matter what happened to any element.
    pub fn cleanup(cleanup: impl FnOnce(&mut D) + 'static) -> Self {
        Self { guard: None, effect: None, cleanup: Some(Box::new(cleanup)) }
    }

    /// Attach an unconditional cleanup to a guarded task.
    #[must_use]
    pub fn and_cleanup(mut self, cleanup: impl FnOnce(&mut D) + 'static) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    pub fn run(self, dom: &mut D) {
        if let Some(effect) = self.effect {
            let attached = self.guard.as_ref().is_none_or(|node| dom.is_connected(node));
            if attached {
                effect(dom);
            } else {
                log::debug!("deferred effect skipped: {:?} left the document", self.guard);
            }
        }
        if let Some(cleanup) = self.cleanup {
            cleanup(dom);
        }
    }
}

/// Where bindings park their deferred work.
pub trait Scheduler<D: Dom> {
    /// Run `task` once `delay_ms` milliseconds have elapsed.
    fn after(&mut self, delay_ms: u32, task: Task<D>);

    /// Run `task` before the next paint.
    fn next_frame(&mut self, task: Task<D>);
}

/// Monotonic token shared between a binding and the tasks it schedules.
#[derive(Debug, Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every token handed out before.
    pub fn advance(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.0.get() == token
    }
}
