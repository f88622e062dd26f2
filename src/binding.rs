//! Binding capability and registry.
//!
//! The remote renderer calls `mounted` once when it inserts a bound element
//! and `updated` after every patch that touches its subtree, including
//! patches unrelated to what the binding watches. Each element kind
//! implements [`Binding`]; a [`Registry`] maps kind names to factories and
//! a [`BoundElement`] pairs one element with its binding instance and
//! enforces mount-before-update.
//!
//! Bindings receive everything they may touch through a [`Ctx`]: the DOM,
//! the scheduler, the outbound event sink and a random source. Nothing else
//! is reachable, which keeps the layer runnable against
//! [`crate::headless`] without a browser or a live connection.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use std::collections::BTreeMap;

use rand::RngCore;
use serde_json::Value;

use crate::dom::Dom;
use crate::error::FxError;
use crate::schedule::Scheduler;

/// One-way channel back to the remote renderer.
pub trait Outbound {
    /// Fire-and-forget event; no reply is awaited.
    fn push_event(&mut self, event: &str, payload: Value);
}

/// DOM events a binding can ask the host to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click,
    PointerMove,
    PointerLeave,
}

impl Interaction {
    /// Browser event type the host listens for.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerMove => "mousemove",
            Self::PointerLeave => "mouseleave",
        }
    }
}

/// A forwarded user interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Click,
    /// Pointer position in viewport coordinates.
    PointerMove { x: f64, y: f64 },
    PointerLeave,
}

/// Host services shared by every binding.
pub struct Env<'a, D: Dom> {
    pub dom: &'a mut D,
    pub timers: &'a mut dyn Scheduler<D>,
    pub outbound: &'a mut dyn Outbound,
    pub rng: &'a mut dyn RngCore,
}

impl<D: Dom> Env<'_, D> {
    /// Borrow the services for one call on `el`.
    pub fn ctx<'a>(&'a mut self, el: &'a D::Node) -> Ctx<'a, D> {
        Ctx { el, dom: &mut *self.dom, timers: &mut *self.timers, outbound: &mut *self.outbound, rng: &mut *self.rng }
    }
}

/// Everything a binding may touch during one lifecycle call.
pub struct Ctx<'a, D: Dom> {
    /// The bound element.
    pub el: &'a D::Node,
    pub dom: &'a mut D,
    pub timers: &'a mut dyn Scheduler<D>,
    pub outbound: &'a mut dyn Outbound,
    pub rng: &'a mut dyn RngCore,
}

impl<D: Dom> Ctx<'_, D> {
    /// Attribute on the bound element.
    #[must_use]
    pub fn read(&self, name: &str) -> Option<String> {
        self.dom.attr(self.el, name)
    }
}

/// Lifecycle callbacks for one element kind.
///
/// Calls for one element never interleave, so a binding reads and writes its
/// snapshot without locking. Every callback must tolerate being invoked when
/// nothing it cares about changed.
pub trait Binding<D: Dom> {
    /// The element was inserted. Runs exactly once, before any update.
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>);

    /// The renderer patched the element's subtree.
    fn on_update(&mut self, ctx: &mut Ctx<'_, D>);

    /// DOM events this binding wants forwarded to [`Binding::on_input`].
    fn interactions(&self) -> &'static [Interaction] {
        &[]
    }

    fn on_input(&mut self, _ctx: &mut Ctx<'_, D>, _input: Input) {}

    /// Named server pushes this binding handles.
    fn server_events(&self) -> &'static [&'static str] {
        &[]
    }

    fn on_server_event(&mut self, _ctx: &mut Ctx<'_, D>, _name: &str, _payload: &Value) {}
}

/// Constructor stored in the registry.
pub type Factory<D> = fn() -> Box<dyn Binding<D>>;

/// Factory for bindings that start from their `Default` state.
#[must_use]
pub fn factory<D: Dom, B: Binding<D> + Default + 'static>() -> Box<dyn Binding<D>> {
    Box::new(B::default())
}

/// Lookup table from kind name to binding factory.
pub struct Registry<D: Dom> {
    factories: BTreeMap<&'static str, Factory<D>>,
}

impl<D: Dom> Default for Registry<D> {
    fn default() -> Self {
        Self { factories: BTreeMap::new() }
    }
}

impl<D: Dom> Registry<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every binding this crate ships.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        crate::bindings::register_standard(&mut registry);
        registry
    }

    /// Register `factory` under `kind`, replacing any earlier entry.
    pub fn register(&mut self, kind: &'static str, factory: Factory<D>) -> &mut Self {
        self.factories.insert(kind, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Create a fresh binding instance for `el`.
    pub fn bind(&self, kind: &str, el: D::Node) -> Result<BoundElement<D>, FxError> {
        let factory = self.factories.get(kind).ok_or_else(|| FxError::UnknownBinding { kind: kind.to_owned() })?;
        Ok(BoundElement { kind: kind.to_owned(), el, binding: factory(), mounted: false })
    }
}

/// One element plus the binding instance (and snapshot) that governs it.
///
/// Dropping it drops the snapshot; the host does so when the renderer
/// removes the element.
pub struct BoundElement<D: Dom> {
    kind: String,
    el: D::Node,
    binding: Box<dyn Binding<D>>,
    mounted: bool,
}

impl<D: Dom> BoundElement<D> {
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn el(&self) -> &D::Node {
        &self.el
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn interactions(&self) -> &'static [Interaction] {
        self.binding.interactions()
    }

    #[must_use]
    pub fn server_events(&self) -> &'static [&'static str] {
        self.binding.server_events()
    }

    pub fn mount(&mut self, env: &mut Env<'_, D>) -> Result<(), FxError> {
        if self.mounted {
            return Err(FxError::AlreadyMounted { kind: self.kind.clone() });
        }
        self.mounted = true;
        self.binding.on_mount(&mut env.ctx(&self.el));
        Ok(())
    }

    pub fn update(&mut self, env: &mut Env<'_, D>) -> Result<(), FxError> {
        if !self.mounted {
            return Err(FxError::NotMounted { kind: self.kind.clone() });
        }
        self.binding.on_update(&mut env.ctx(&self.el));
        Ok(())
    }

    pub fn input(&mut self, env: &mut Env<'_, D>, input: Input) {
        if !self.mounted {
            log::debug!("{} ignored {input:?} before mount", self.kind);
            return;
        }
        self.binding.on_input(&mut env.ctx(&self.el), input);
    }

    pub fn server_event(&mut self, env: &mut Env<'_, D>, name: &str, payload: &Value) {
        if !self.mounted {
            log::debug!("{} ignored server event {name} before mount", self.kind);
            return;
        }
        self.binding.on_server_event(&mut env.ctx(&self.el), name, payload);
    }
}
