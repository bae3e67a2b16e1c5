use crate::constants::{
    BOMB_INVINCIBILITY, BULLET_SPEED, HIT_INVINCIBILITY, LOOP_COOLDOWN, LOOP_DURATION,
    LOOP_RADIUS, MAX_THRUST, MAX_WEAPON_TIER, PLAYER_MAX_BOMBS, PLAYER_MAX_HP,
    PLAYER_MAX_SHIELD, PLAYER_START_ANGLE, PLAYER_START_BOMBS, ROTATION_SPEED, SPREAD_ANGLE,
    THRUST_ACCEL, THRUST_DECAY, TWIN_BARREL_OFFSET,
};
use crate::geometry::{wrap_position, Vec2};

use super::Bullet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState {
    Inactive,
    Active {
        started_at: u64,
        origin: Vec2,
        heading: f32,
    },
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Heading in degrees.
    pub angle: f32,
    pub thrust: f32,
    pub weapon_tier: u8,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub max_shield: i32,
    pub bombs: u32,
    pub max_bombs: u32,
    pub invincible_until: u64,
    pub loop_state: LoopState,
    /// `None` until the first loop, so the maneuver is ready at game start.
    pub last_loop_at: Option<u64>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: PLAYER_START_ANGLE,
            thrust: 0.0,
            weapon_tier: 1,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            shield: 0,
            max_shield: PLAYER_MAX_SHIELD,
            bombs: PLAYER_START_BOMBS,
            max_bombs: PLAYER_MAX_BOMBS,
            invincible_until: 0,
            loop_state: LoopState::Inactive,
            last_loop_at: None,
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    pub fn is_invincible(&self, now: u64) -> bool {
        now < self.invincible_until
    }

    fn extend_invincibility(&mut self, until: u64) {
        self.invincible_until = self.invincible_until.max(until);
    }

    // ── Damage & pickups ──────────────────────────────────────────────────────

    /// The only way the player loses shield or hp. Returns `true` when this
    /// hit killed the player.
    pub fn take_damage(&mut self, amount: i32, now: u64) -> bool {
        if self.is_invincible(now) {
            return false;
        }
        if self.shield > 0 {
            self.shield = (self.shield - amount).max(0);
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.extend_invincibility(now + HIT_INVINCIBILITY);
        self.hp == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn add_shield(&mut self, amount: i32) {
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    pub fn upgrade_weapon(&mut self) {
        self.weapon_tier = (self.weapon_tier + 1).min(MAX_WEAPON_TIER);
    }

    pub fn add_bomb(&mut self) {
        self.bombs = (self.bombs + 1).min(self.max_bombs);
    }

    /// Spends a bomb charge. Returns `false` (and changes nothing) when empty.
    pub fn use_bomb(&mut self, now: u64) -> bool {
        if self.bombs == 0 {
            return false;
        }
        self.bombs -= 1;
        self.extend_invincibility(now + BOMB_INVINCIBILITY);
        true
    }

    // ── Loop maneuver ─────────────────────────────────────────────────────────

    pub fn is_looping(&self) -> bool {
        matches!(self.loop_state, LoopState::Active { .. })
    }

    pub fn loop_ready(&self, now: u64) -> bool {
        self.last_loop_at
            .map_or(true, |last| now.saturating_sub(last) > LOOP_COOLDOWN)
    }

    pub fn start_loop(&mut self, now: u64) -> bool {
        if self.is_looping() || !self.loop_ready(now) {
            return false;
        }
        self.loop_state = LoopState::Active {
            started_at: now,
            origin: self.pos,
            heading: self.angle,
        };
        self.last_loop_at = Some(now);
        self.extend_invincibility(now + LOOP_DURATION);
        true
    }

    /// Moves the craft along the loop arc. The circle sits `LOOP_RADIUS`
    /// above the starting point, so the arc begins and ends there.
    pub fn update_loop(&mut self, now: u64) {
        let LoopState::Active {
            started_at,
            origin,
            heading,
        } = self.loop_state
        else {
            return;
        };

        let progress = now.saturating_sub(started_at) as f32 / LOOP_DURATION as f32;
        if progress >= 1.0 {
            self.loop_state = LoopState::Inactive;
            self.angle = heading;
            self.pos = origin;
            return;
        }

        self.angle = heading + progress * 360.0;
        let center = Vec2::new(origin.x, origin.y - LOOP_RADIUS);
        // Phase +π/2 puts theta 0 at the origin, so the arc starts and ends there.
        let theta = progress * std::f32::consts::TAU + std::f32::consts::FRAC_PI_2;
        self.pos = Vec2::new(
            center.x + LOOP_RADIUS * theta.cos(),
            center.y + LOOP_RADIUS * theta.sin(),
        );
    }

    // ── Flight ────────────────────────────────────────────────────────────────

    /// Applies held manual controls for one tick.
    pub fn steer_manual(&mut self, left: bool, right: bool, up: bool, down: bool) {
        if left {
            self.angle -= ROTATION_SPEED;
        }
        if right {
            self.angle += ROTATION_SPEED;
        }
        if up {
            self.thrust = (self.thrust + THRUST_ACCEL).min(MAX_THRUST);
        }
        if down {
            self.thrust = (self.thrust - THRUST_ACCEL).max(0.0);
        }
        if self.thrust > 0.0 {
            self.thrust = (self.thrust - THRUST_DECAY).max(0.0);
        }
    }

    /// Advances along the heading and wraps around the world edges.
    pub fn advance(&mut self, width: f32, height: f32) {
        if self.is_looping() {
            return;
        }
        self.pos += Vec2::from_heading(self.angle) * self.thrust;
        self.pos = wrap_position(self.pos, width, height);
    }

    /// Bullets for one trigger pull at the current weapon tier.
    pub fn shoot(&self) -> Vec<Bullet> {
        let vel = Vec2::from_heading(self.angle) * BULLET_SPEED;
        match self.weapon_tier {
            1 => vec![Bullet::new(self.pos, vel)],
            2 => {
                let offset = Vec2::from_heading(self.angle + 90.0) * TWIN_BARREL_OFFSET;
                vec![
                    Bullet::new(self.pos + offset, vel),
                    Bullet::new(self.pos - offset, vel),
                ]
            }
            _ => vec![
                Bullet::new(self.pos, vel),
                Bullet::new(
                    self.pos,
                    Vec2::from_heading(self.angle - SPREAD_ANGLE) * BULLET_SPEED,
                ),
                Bullet::new(
                    self.pos,
                    Vec2::from_heading(self.angle + SPREAD_ANGLE) * BULLET_SPEED,
                ),
            ],
        }
    }
}
