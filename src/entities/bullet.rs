use crate::geometry::{inside, Vec2};

/// A player-fired projectile flying in a straight line.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Returns `false` once the bullet has left the visible rectangle.
    pub fn update(&mut self, width: f32, height: f32) -> bool {
        self.pos += self.vel;
        inside(self.pos, width, height, 0.0)
    }
}
