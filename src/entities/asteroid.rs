use crate::constants::ASTEROID_SPAWN_MARGIN;
use crate::geometry::{inside, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Drawn radius, also the collision radius.
    pub radius: u32,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, radius: u32) -> Self {
        Self { pos, vel, radius }
    }

    /// Drifts in a straight line; expires once clear of the spawn margin.
    pub fn update(&mut self, width: f32, height: f32) -> bool {
        self.pos += self.vel;
        inside(self.pos, width, height, ASTEROID_SPAWN_MARGIN)
    }
}
