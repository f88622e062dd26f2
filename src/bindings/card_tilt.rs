//! 3D hover tilt following the pointer.

#[cfg(test)]
#[path = "card_tilt_test.rs"]
mod card_tilt_test;

use crate::binding::{Binding, Ctx, Input, Interaction};
use crate::consts::{TILT_DIVISOR, TILT_PERSPECTIVE_PX, TILT_SCALE};
use crate::dom::{Dom, Rect};

pub const KIND: &str = "CardTilt";

/// Transform tilting `rect` away from the pointer at (`x`, `y`).
///
/// Rotation is one degree per ten pixels of offset from the centre. A rect
/// with no area yields a flat tilt.
#[must_use]
pub fn tilt_transform(rect: Rect, x: f64, y: f64) -> String {
    let (rotate_x, rotate_y) = if rect.width > 0.0 && rect.height > 0.0 {
        let local_x = x - rect.left;
        let local_y = y - rect.top;
        ((local_y - rect.height / 2.0) / TILT_DIVISOR, (rect.width / 2.0 - local_x) / TILT_DIVISOR)
    } else {
        (0.0, 0.0)
    };
    format!(
        "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) scale({TILT_SCALE})"
    )
}

#[derive(Debug, Default)]
pub struct CardTilt;

impl<D: Dom> Binding<D> for CardTilt {
    fn on_mount(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn on_update(&mut self, _ctx: &mut Ctx<'_, D>) {}

    fn interactions(&self) -> &'static [Interaction] {
        &[Interaction::PointerMove, Interaction::PointerLeave]
    }

    fn on_input(&mut self, ctx: &mut Ctx<'_, D>, input: Input) {
        match input {
            Input::PointerMove { x, y } => {
                let transform = tilt_transform(ctx.dom.rect(ctx.el), x, y);
                ctx.dom.set_style(ctx.el, "transform", &transform);
            }
            Input::PointerLeave => ctx.dom.remove_style(ctx.el, "transform"),
            Input::Click => {}
        }
    }
}
