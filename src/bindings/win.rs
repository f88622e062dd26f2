//! Win celebration: a persistent highlight plus a burst of confetti.
//!
//! Every mount or update that sees `data-winner="true"` fires a fresh burst
//! of [`PARTICLE_COUNT`] particles. Particles fan out evenly around a circle,
//! with random colour, shape, speed and lifetime inside fixed bounds. Each
//! particle removes itself when its animation finishes, and again from a
//! timeout at the end of its lifetime in case `finished` never fires.

#[cfg(test)]
#[path = "win_test.rs"]
mod win_test;

use std::f64::consts::TAU;

use rand::{Rng, RngCore};

use crate::binding::{Binding, Ctx};
use crate::change::flag;
use crate::consts::{
    FALLBACK_SLACK_MS, PARTICLE_CLASS, PARTICLE_COLORS, PARTICLE_COUNT, PARTICLE_DURATION_SPREAD_MS, PARTICLE_EASING,
    PARTICLE_FALL_PX, PARTICLE_LIFT_PX, PARTICLE_MIN_MS, PARTICLE_MIN_VELOCITY, PARTICLE_SIZE_PX,
    PARTICLE_VELOCITY_SPREAD, PARTICLE_Z_INDEX, WIN_CLASS, WINNER_ATTR,
};
use crate::dom::{Dom, Keyframe, Timing};
use crate::schedule::Task;

pub const KIND: &str = "WinCelebration";

/// One confetti particle, fully decided before it is spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub color: &'static str,
    pub round: bool,
    /// Direction of travel in radians.
    pub angle: f64,
    /// Distance covered by the first leg, in pixels.
    pub velocity: f64,
    pub duration_ms: u32,
}

impl Particle {
    /// Particle `index` of `count`; the angle is fixed by the index, the rest is drawn from `rng`.
    pub fn new(index: u32, count: u32, rng: &mut dyn RngCore) -> Self {
        let count = count.max(1);
        Self {
            color: PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())],
            round: rng.random_bool(0.5),
            angle: TAU * f64::from(index) / f64::from(count),
            velocity: PARTICLE_MIN_VELOCITY + rng.random::<f64>() * PARTICLE_VELOCITY_SPREAD,
            duration_ms: PARTICLE_MIN_MS + rng.random_range(0..PARTICLE_DURATION_SPREAD_MS),
        }
    }

    /// Offset reached at 30% of the animation.
    #[must_use]
    pub fn burst(&self) -> (f64, f64) {
        (self.angle.cos() * self.velocity, self.angle.sin() * self.velocity - PARTICLE_LIFT_PX)
    }

    #[must_use]
    pub fn keyframes(&self) -> Vec<Keyframe> {
        let (x, y) = self.burst();
        let (end_x, end_y) = (x * 1.5, y * 1.5 + PARTICLE_FALL_PX);
        vec![
            Keyframe::new().with("transform", "translate(-50%, -50%) scale(0)").with("opacity", "1"),
            Keyframe::new()
                .with("transform", format!("translate(calc(-50% + {x}px), calc(-50% + {y}px)) scale(1)"))
                .with("opacity", "1")
                .at(0.3),
            Keyframe::new()
                .with("transform", format!("translate(calc(-50% + {end_x}px), calc(-50% + {end_y}px)) scale(0)"))
                .with("opacity", "0"),
        ]
    }
}

#[derive(Debug, Default)]
pub struct WinCelebration;

impl WinCelebration {
    fn celebrate<D: Dom>(ctx: &mut Ctx<'_, D>) {
        ctx.dom.add_class(ctx.el, WIN_CLASS);
        for index in 0..PARTICLE_COUNT {
            let particle = Particle::new(index, PARTICLE_COUNT, ctx.rng);
            spawn(ctx, &particle);
        }
    }
}

fn spawn<D: Dom>(ctx: &mut Ctx<'_, D>, particle: &Particle) {
    let node = match ctx.dom.create("div") {
        Ok(node) => node,
        Err(err) => {
            log::debug!("particle skipped: {err}");
            return;
        }
    };
    ctx.dom.add_class(&node, PARTICLE_CLASS);
    let size = format!("{PARTICLE_SIZE_PX}px");
    for (prop, value) in [
        ("position", "absolute"),
        ("width", size.as_str()),
        ("height", size.as_str()),
        ("background", particle.color),
        ("border-radius", if particle.round { "50%" } else { "0" }),
        ("pointer-events", "none"),
        ("left", "50%"),
        ("top", "50%"),
        ("z-index", PARTICLE_Z_INDEX),
    ] {
        ctx.dom.set_style(&node, prop, value);
    }
    ctx.dom.append(ctx.el, &node);

    let timing = Timing { duration_ms: f64::from(particle.duration_ms), easing: PARTICLE_EASING };
    let finished = node.clone();
    let on_finish = Box::new(move |dom: &mut D| dom.remove(&finished));
    if let Err(err) = ctx.dom.animate(&node, &particle.keyframes(), timing, on_finish) {
        log::debug!("particle left static: {err}");
    }
    ctx.timers.after(particle.duration_ms + FALLBACK_SLACK_MS, Task::cleanup(move |dom: &mut D| dom.remove(&node)));
}

impl<D: Dom> Binding<D> for WinCelebration {
    fn on_mount(&mut self, ctx: &mut Ctx<'_, D>) {
        if flag(ctx.read(WINNER_ATTR).as_deref()) {
            Self::celebrate(ctx);
        }
    }

    fn on_update(&mut self, ctx: &mut Ctx<'_, D>) {
        if flag(ctx.read(WINNER_ATTR).as_deref()) {
            Self::celebrate(ctx);
        }
    }
}
