/// Cosmetic particle bursts.
///
/// Particles are spawned on catches and hazard hits and aged once per frame.
/// Nothing in the simulation reads them back, so dropping this module's
/// output would not change a single score.

use rand::Rng;

use crate::entities::{Particle, Rgb};

pub const CATCH_BURST: usize = 18;
pub const HAZARD_BURST: usize = 30;

/// Added to every particle's vertical velocity each frame.
pub const GRAVITY: f32 = 0.25;

/// Create `count` particles at (`x`, `y`) flying outward and upward.
pub fn burst(rng: &mut impl Rng, x: f32, y: f32, count: usize, color: Rgb) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let life = rng.gen_range(20..=40);
            Particle {
                x,
                y,
                vx: rng.gen_range(-4.0..=4.0),
                vy: rng.gen_range(-6.0..=-1.0),
                color,
                radius: rng.gen_range(3.0..=7.0),
                life,
                max_life: life,
            }
        })
        .collect()
}

/// Advance every particle by one frame, dropping the ones that expire.
pub fn step(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .filter_map(|p| {
            let life = p.life.saturating_sub(1);
            if life == 0 {
                return None;
            }
            Some(Particle {
                x: p.x + p.vx,
                y: p.y + p.vy,
                vy: p.vy + GRAVITY,
                life,
                ..p.clone()
            })
        })
        .collect()
}

/// Radius scaled by remaining lifetime.
pub fn current_radius(p: &Particle) -> f32 {
    p.radius * p.life_fraction()
}
