use serde_json::json;

use super::*;

#[test]
fn inserted_nodes_are_connected_under_body() {
    let mut dom = MemoryDom::new();
    let parent = dom.insert(dom.body(), "div", &["outer"]);
    let child = dom.insert(parent, "span", &["inner"]);

    assert!(dom.is_connected(&child));
    assert_eq!(dom.parent(child), Some(parent));
    assert_eq!(dom.tag(child), Some("span"));

    dom.remove(&parent);
    assert!(!dom.is_connected(&child));
    assert_eq!(dom.count_class("inner"), 0);
}

#[test]
fn created_nodes_start_detached() {
    let mut dom = MemoryDom::new();
    let node = dom.create("div").expect("create");
    assert!(!dom.is_connected(&node));
    dom.append_to_body(&node);
    assert!(dom.is_connected(&node));
}

#[test]
fn find_all_returns_descendants_in_document_order() {
    let mut dom = MemoryDom::new();
    let root = dom.insert(dom.body(), "div", &[]);
    let a = dom.insert(root, "div", &["card"]);
    let wrapper = dom.insert(root, "div", &[]);
    let b = dom.insert(wrapper, "div", &["card"]);
    let c = dom.insert(root, "div", &["card"]);

    assert_eq!(dom.find_all(&root, "card"), vec![a, b, c]);
    assert_eq!(dom.find_first(&root, "card"), Some(a));
}

#[test]
fn clone_deep_copies_subtree_detached() {
    let mut dom = MemoryDom::new();
    let card = dom.insert(dom.body(), "div", &["card"]);
    dom.set_attr(&card, "data-suit", "hearts");
    dom.insert(card, "span", &["pip"]);

    let copy = dom.clone_deep(&card).expect("clone");

    assert_ne!(copy, card);
    assert!(!dom.is_connected(&copy));
    assert_eq!(dom.attr(&copy, "data-suit").as_deref(), Some("hearts"));
    assert_eq!(dom.find_all(&copy, "pip").len(), 1);
    assert_eq!(dom.count_class("pip"), 1);
}

#[test]
fn class_and_style_edits() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);

    dom.add_classes(&el, &["a", "b"]);
    dom.add_class(&el, "a");
    assert!(dom.has_class(&el, "a"));
    dom.remove_classes(&el, &["a"]);
    assert!(!dom.has_class(&el, "a"));
    assert!(dom.has_class(&el, "b"));

    dom.set_style(&el, "opacity", "0");
    assert_eq!(dom.style(el, "opacity"), Some("0"));
    dom.remove_style(&el, "opacity");
    assert_eq!(dom.style(el, "opacity"), None);
}

#[test]
fn animations_finish_on_demand() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    let timing = Timing { duration_ms: 100.0, easing: "linear" };
    let target = el;

    dom.animate(&el, &[Keyframe::new().with("opacity", "1")], timing, Box::new(move |dom: &mut MemoryDom| dom.remove(&target)))
        .expect("animate");

    assert_eq!(dom.animations().len(), 1);
    assert!(dom.is_connected(&el));
    assert_eq!(dom.finish_animations(), 1);
    assert!(!dom.is_connected(&el));
    assert_eq!(dom.finish_animations(), 0);
}

#[test]
fn unsupported_animation_reports_error() {
    let mut dom = MemoryDom::new();
    let el = dom.insert(dom.body(), "div", &[]);
    dom.set_animation_supported(false);
    let timing = Timing { duration_ms: 100.0, easing: "linear" };

    let result = dom.animate(&el, &[], timing, Box::new(|_: &mut MemoryDom| {}));

    assert_eq!(result, Err(DomError::AnimationUnsupported));
    assert!(dom.animations().is_empty());
}

#[test]
fn stage_records_outbound_events() {
    let mut stage = Stage::new(3);
    stage.outbound.push_event("a", json!(1));
    stage.outbound.push_event("b", json!(2));
    stage.outbound.push_event("a", json!(3));
    assert_eq!(stage.outbound.payloads("a"), vec![&json!(1), &json!(3)]);
}

#[test]
fn stage_advances_virtual_clock() {
    let mut stage = Stage::new(3);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    stage.timers.after(10, Task::cleanup(move |dom: &mut MemoryDom| dom.remove(&el)));

    assert_eq!(stage.advance(9), 0);
    assert!(stage.dom.is_connected(&el));
    assert_eq!(stage.advance(1), 1);
    assert!(!stage.dom.is_connected(&el));
}
