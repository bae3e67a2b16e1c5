use crate::constants::{
    BOSS_BARRAGE_BULLETS, BOSS_FAST_ATTACK_TICKS, BOSS_HP, BOSS_SIZE, BOSS_SLOW_ATTACK_TICKS,
    BOSS_SPAWN_Y, BOSS_SPEED, BOSS_SPREAD_ANGLE, BOSS_SWEEP_RAD_PER_TICK, ENEMY_BULLET_SPEED,
};
use crate::geometry::Vec2;

use super::EnemyBullet;

/// Tier stamped on aimed boss shots; homing like any tier >= 4 bullet.
const AIMED_SHOT_TIER: u8 = 5;
const BARRAGE_TIER: u8 = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub size: f32,
    /// Horizontal patrol direction, +1 or -1.
    pub direction: f32,
    pub attack_timer: u32,
    /// Ticks alive; drives the barrage rotation.
    pub age: u32,
    pub phase: u8,
}

impl Boss {
    pub fn new(width: f32) -> Self {
        Self::with_hp(width, BOSS_HP, BOSS_HP)
    }

    pub fn with_hp(width: f32, hp: i32, max_hp: i32) -> Self {
        let mut boss = Self {
            pos: Vec2::new(width / 2.0, BOSS_SPAWN_Y),
            hp,
            max_hp,
            speed: BOSS_SPEED,
            size: BOSS_SIZE,
            direction: 1.0,
            attack_timer: 0,
            age: 0,
            phase: 1,
        };
        boss.phase = boss.compute_phase();
        boss
    }

    /// Phase as a pure function of the hp ratio.
    pub fn compute_phase(&self) -> u8 {
        let ratio = self.hp as f32 / self.max_hp as f32;
        if ratio > 0.66 {
            1
        } else if ratio > 0.33 {
            2
        } else {
            3
        }
    }

    /// Patrols horizontally, bouncing `size` units from either edge.
    pub fn update(&mut self, width: f32) {
        self.pos.x += self.speed * self.direction;
        if self.pos.x > width - self.size || self.pos.x < self.size {
            self.direction = -self.direction;
        }
        self.phase = self.compute_phase();
        self.attack_timer += 1;
        self.age += 1;
    }

    pub fn attack_interval(&self) -> u32 {
        if self.phase < 3 {
            BOSS_SLOW_ATTACK_TICKS
        } else {
            BOSS_FAST_ATTACK_TICKS
        }
    }

    /// True when the attack timer has run out; resets it.
    pub fn should_shoot(&mut self) -> bool {
        if self.attack_timer >= self.attack_interval() {
            self.attack_timer = 0;
            true
        } else {
            false
        }
    }

    pub fn shoot(&self, target: Vec2, now: u64) -> Vec<EnemyBullet> {
        let bullet = |heading_rad: f32, tier: u8| {
            let vel = Vec2::new(heading_rad.cos(), heading_rad.sin()) * ENEMY_BULLET_SPEED;
            EnemyBullet::new(self.pos, vel, tier, now)
        };

        match self.phase {
            1 => (target - self.pos)
                .normalized()
                .map(|dir| {
                    EnemyBullet::new(self.pos, dir * ENEMY_BULLET_SPEED, AIMED_SHOT_TIER, now)
                })
                .into_iter()
                .collect(),
            2 => {
                let base = (target - self.pos).heading();
                [-BOSS_SPREAD_ANGLE, 0.0, BOSS_SPREAD_ANGLE]
                    .iter()
                    .map(|offset| bullet((base + offset).to_radians(), AIMED_SHOT_TIER))
                    .collect()
            }
            _ => {
                let sweep = self.age as f32 * BOSS_SWEEP_RAD_PER_TICK;
                let step = std::f32::consts::TAU / BOSS_BARRAGE_BULLETS as f32;
                (0..BOSS_BARRAGE_BULLETS)
                    .map(|i| bullet(step * i as f32 + sweep, BARRAGE_TIER))
                    .collect()
            }
        }
    }

    /// Returns `true` when the boss is out of hp.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hp <= 0
    }
}
