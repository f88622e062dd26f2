use serde_json::json;

use super::*;
use crate::headless::{MemoryDom, Stage};

/// Counts every callback it receives.
#[derive(Default)]
struct Probe {
    mounts: usize,
    updates: usize,
    inputs: Vec<Input>,
    pushes: Vec<String>,
}

impl Binding<MemoryDom> for Probe {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, MemoryDom>) {
        self.mounts += 1;
        ctx.dom.set_attr(ctx.el, "data-mounts", &self.mounts.to_string());
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, MemoryDom>) {
        self.updates += 1;
        ctx.dom.set_attr(ctx.el, "data-updates", &self.updates.to_string());
    }

    fn interactions(&self) -> &'static [Interaction] {
        &[Interaction::Click]
    }

    fn on_input(&mut self, ctx: &mut Ctx<'_, MemoryDom>, input: Input) {
        self.inputs.push(input);
        ctx.dom.set_attr(ctx.el, "data-inputs", &self.inputs.len().to_string());
    }

    fn server_events(&self) -> &'static [&'static str] {
        &["ping"]
    }

    fn on_server_event(&mut self, ctx: &mut Ctx<'_, MemoryDom>, name: &str, payload: &Value) {
        self.pushes.push(name.to_owned());
        ctx.outbound.push_event("pong", payload.clone());
    }
}

fn probe_registry() -> Registry<MemoryDom> {
    let mut registry = Registry::new();
    registry.register("Probe", factory::<MemoryDom, Probe>);
    registry
}

// =============================================================
// Registry
// =============================================================

#[test]
fn standard_registry_knows_every_kind() {
    let registry = Registry::<MemoryDom>::standard();
    let kinds: Vec<&str> = registry.kinds().collect();
    assert_eq!(
        kinds,
        vec![
            "CardFlip",
            "CardPlay",
            "CardTilt",
            "DeskCard",
            "GameFlash",
            "HandCards",
            "RoundIndicator",
            "TurnProgress",
            "WinCelebration"
        ]
    );
}

#[test]
fn unknown_kind_is_an_error() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    let err = Registry::<MemoryDom>::standard().bind("Nope", el).err();
    assert_eq!(err, Some(FxError::UnknownBinding { kind: "Nope".into() }));
}

#[test]
fn each_bind_gets_a_fresh_instance() {
    let registry = probe_registry();
    let mut stage = Stage::new(1);
    let a = stage.dom.insert(stage.dom.body(), "div", &[]);
    let b = stage.dom.insert(stage.dom.body(), "div", &[]);

    let mut first = registry.bind("Probe", a).expect("bind a");
    let mut second = registry.bind("Probe", b).expect("bind b");
    first.mount(&mut stage.env()).expect("mount a");
    first.update(&mut stage.env()).expect("update a");
    second.mount(&mut stage.env()).expect("mount b");

    assert_eq!(stage.dom.attr(&a, "data-updates").as_deref(), Some("1"));
    assert_eq!(stage.dom.attr(&b, "data-updates"), None);
}

// =============================================================
// BoundElement lifecycle
// =============================================================

#[test]
fn mount_runs_exactly_once() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    let mut bound = probe_registry().bind("Probe", el).expect("bind");

    assert!(!bound.is_mounted());
    bound.mount(&mut stage.env()).expect("first mount");
    assert!(bound.is_mounted());
    let again = bound.mount(&mut stage.env());

    assert_eq!(again, Err(FxError::AlreadyMounted { kind: "Probe".into() }));
    assert_eq!(stage.dom.attr(&el, "data-mounts").as_deref(), Some("1"));
}

#[test]
fn update_before_mount_is_rejected() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    let mut bound = probe_registry().bind("Probe", el).expect("bind");

    assert_eq!(bound.update(&mut stage.env()), Err(FxError::NotMounted { kind: "Probe".into() }));
    assert_eq!(stage.dom.attr(&el, "data-updates"), None);
}

#[test]
fn input_and_server_events_wait_for_mount() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    let mut bound = probe_registry().bind("Probe", el).expect("bind");

    bound.input(&mut stage.env(), Input::Click);
    bound.server_event(&mut stage.env(), "ping", &json!({"n": 1}));
    assert_eq!(stage.dom.attr(&el, "data-inputs"), None);
    assert!(stage.outbound.events.is_empty());

    bound.mount(&mut stage.env()).expect("mount");
    bound.input(&mut stage.env(), Input::Click);
    bound.server_event(&mut stage.env(), "ping", &json!({"n": 2}));

    assert_eq!(stage.dom.attr(&el, "data-inputs").as_deref(), Some("1"));
    assert_eq!(stage.outbound.payloads("pong"), vec![&json!({"n": 2})]);
}

#[test]
fn bound_element_reports_binding_capabilities() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    let bound = probe_registry().bind("Probe", el).expect("bind");

    assert_eq!(bound.kind(), "Probe");
    assert_eq!(*bound.el(), el);
    assert_eq!(bound.interactions(), &[Interaction::Click]);
    assert_eq!(bound.server_events(), &["ping"]);
}

#[test]
fn interaction_event_names() {
    assert_eq!(Interaction::Click.event_name(), "click");
    assert_eq!(Interaction::PointerMove.event_name(), "mousemove");
    assert_eq!(Interaction::PointerLeave.event_name(), "mouseleave");
}
