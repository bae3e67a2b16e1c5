use rand::Rng;

use crate::geometry::{wrap_position, Vec2};

use super::Palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Weapon,
    Health,
    Shield,
    Bomb,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Weapon,
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::Bomb,
    ];

    pub fn color(self) -> Palette {
        match self {
            PowerUpKind::Weapon => Palette::Yellow,
            PowerUpKind::Health => Palette::Green,
            PowerUpKind::Shield => Palette::Cyan,
            PowerUpKind::Bomb => Palette::Orange,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, vel: Vec2, kind: PowerUpKind) -> Self {
        Self { pos, vel, kind }
    }

    /// A drop of random kind drifting slowly downward.
    pub fn random(pos: Vec2, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(0.5..=1.5));
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        Self::new(pos, vel, kind)
    }

    /// Power-ups wrap around the world instead of expiring.
    pub fn update(&mut self, width: f32, height: f32) -> bool {
        self.pos = wrap_position(self.pos + self.vel, width, height);
        true
    }
}
