use rand::Rng;

use crate::constants::{EXPLOSION_PARTICLES, PARTICLE_DAMPING, PARTICLE_LIFETIME};
use crate::geometry::Vec2;

use super::Palette;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Palette,
    pub size: f32,
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Palette, size: f32, lifetime: u32) -> Self {
        Self {
            pos,
            vel,
            color,
            size,
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// A particle flying off in a random direction, each velocity component
    /// drawn from `[-spread, spread]`.
    pub fn spark(
        pos: Vec2,
        spread: f32,
        color: Palette,
        size: f32,
        lifetime: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let vel = Vec2::new(
            rng.gen_range(-spread..=spread),
            rng.gen_range(-spread..=spread),
        );
        Self::new(pos, vel, color, size, lifetime)
    }

    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel = self.vel * PARTICLE_DAMPING;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }

    /// Size to draw at, shrinking linearly with remaining life (never below 1).
    pub fn drawn_size(&self) -> u32 {
        if self.max_lifetime == 0 {
            return 1;
        }
        let ratio = self.lifetime as f32 / self.max_lifetime as f32;
        ((self.size * ratio) as u32).max(1)
    }
}

/// A burst of particles that lives while any of them does.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(pos: Vec2, color: Palette, size: f32, rng: &mut impl Rng) -> Self {
        let count = (EXPLOSION_PARTICLES * size) as usize;
        let particles = (0..count)
            .map(|_| {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = rng.gen_range(1.0..=4.0) * size;
                let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
                let particle_size = rng.gen_range(2..=4) as f32 * size;
                Particle::new(pos, vel, color, particle_size, PARTICLE_LIFETIME)
            })
            .collect();
        Self { particles }
    }

    pub fn update(&mut self) -> bool {
        self.particles.retain_mut(|p| p.update());
        !self.particles.is_empty()
    }
}
