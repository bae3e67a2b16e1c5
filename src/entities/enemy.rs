use rand::Rng;

use crate::constants::{
    ENEMY_BULLET_SPEED, ENEMY_FIRE_ODDS, ENEMY_POINTS_PER_TIER, ENEMY_ROTATION_SPEED,
    HOMING_LIFETIME, HOMING_SPEED, HOMING_TIER,
};
use crate::geometry::{bearing, inside, turn_toward, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub angle: f32,
    /// 1..=6
    pub tier: u8,
    pub hp: i32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(tier: u8, pos: Vec2, angle: f32) -> Self {
        let tier = tier.clamp(1, 6);
        Self {
            pos,
            angle,
            tier,
            hp: 2 * i32::from(tier),
            speed: 1.0 + 0.5 * f32::from(tier),
        }
    }

    /// Turns toward `target` at the enemy turn rate and moves along the new
    /// heading.
    pub fn update(&mut self, target: Vec2) {
        if self.pos != target {
            self.angle = turn_toward(self.angle, bearing(self.pos, target), ENEMY_ROTATION_SPEED);
        }
        self.pos += Vec2::from_heading(self.angle) * self.speed;
    }

    pub fn should_shoot(&self, rng: &mut impl Rng) -> bool {
        let odds = ENEMY_FIRE_ODDS / u32::from(self.tier);
        rng.gen_range(0..=odds) == 0
    }

    pub fn shoot(&self, now: u64) -> EnemyBullet {
        EnemyBullet::new(
            self.pos,
            Vec2::from_heading(self.angle) * ENEMY_BULLET_SPEED,
            self.tier,
            now,
        )
    }

    /// Returns `true` when this hit destroyed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hp <= 0
    }

    pub fn points(&self) -> u32 {
        u32::from(self.tier) * ENEMY_POINTS_PER_TIER
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tier: u8,
    pub created_at: u64,
}

impl EnemyBullet {
    pub fn new(pos: Vec2, vel: Vec2, tier: u8, created_at: u64) -> Self {
        Self {
            pos,
            vel,
            tier,
            created_at,
        }
    }

    pub fn is_homing(&self) -> bool {
        self.tier >= HOMING_TIER
    }

    /// Homing bullets chase `target` at a fixed speed and burn out after
    /// their lifetime; everything else flies straight. Returns `false` when
    /// the bullet expired or left the world.
    pub fn update(&mut self, target: Vec2, now: u64, width: f32, height: f32) -> bool {
        if self.is_homing() {
            if now.saturating_sub(self.created_at) > HOMING_LIFETIME {
                return false;
            }
            if let Some(dir) = (target - self.pos).normalized() {
                self.pos += dir * HOMING_SPEED;
            }
        } else {
            self.pos += self.vel;
        }
        inside(self.pos, width, height, 0.0)
    }
}
