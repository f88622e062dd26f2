use super::*;
use crate::binding::Registry;
use crate::headless::{MemoryDom, Stage};

#[test]
fn centre_pointer_is_flat() {
    let rect = Rect::new(100.0, 200.0, 80.0, 120.0);
    assert_eq!(tilt_transform(rect, 140.0, 260.0), "perspective(500px) rotateX(0deg) rotateY(0deg) scale(1.05)");
}

#[test]
fn corner_pointer_tilts_away() {
    let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
    // Top-left corner: 50px above centre, 100px left of it.
    assert_eq!(tilt_transform(rect, 0.0, 0.0), "perspective(500px) rotateX(-5deg) rotateY(10deg) scale(1.05)");
}

#[test]
fn empty_rect_yields_no_rotation() {
    let rect = Rect::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(tilt_transform(rect, 50.0, 50.0), "perspective(500px) rotateX(0deg) rotateY(0deg) scale(1.05)");
}

#[test]
fn pointer_move_then_leave() {
    let mut stage = Stage::new(1);
    let el = stage.dom.insert(stage.dom.body(), "div", &[]);
    stage.dom.set_rect(el, Rect::new(0.0, 0.0, 200.0, 100.0));
    let mut bound = Registry::<MemoryDom>::standard().bind(KIND, el).expect("bind");
    bound.mount(&mut stage.env()).expect("mount");

    assert_eq!(bound.interactions(), &[Interaction::PointerMove, Interaction::PointerLeave]);

    bound.input(&mut stage.env(), Input::PointerMove { x: 0.0, y: 0.0 });
    assert_eq!(
        stage.dom.style(el, "transform"),
        Some("perspective(500px) rotateX(-5deg) rotateY(10deg) scale(1.05)")
    );

    bound.input(&mut stage.env(), Input::PointerLeave);
    assert_eq!(stage.dom.style(el, "transform"), None);
}
