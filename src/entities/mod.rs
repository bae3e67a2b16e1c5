//! All game entity types and the world they live in.
//!
//! Each entity owns its own state and a per-tick `update` rule. Entities
//! never reference each other; cross-entity effects are computed by
//! [`crate::collision`] over the live collections in [`GameState`].

mod asteroid;
mod boss;
mod bullet;
mod enemy;
mod particle;
mod player;
mod power_up;

pub use asteroid::Asteroid;
pub use boss::Boss;
pub use bullet::Bullet;
pub use enemy::{Enemy, EnemyBullet};
pub use particle::{Explosion, Particle};
pub use player::{LoopState, Player};
pub use power_up::{PowerUp, PowerUpKind};

use crate::geometry::Vec2;

/// Colours the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Gray,
    Orange,
    Purple,
    Cyan,
}

impl Palette {
    /// Colour of an enemy (and its explosion) by tier.
    pub fn for_tier(tier: u8) -> Palette {
        match tier {
            1 => Palette::Red,
            2 => Palette::Yellow,
            3 => Palette::Blue,
            4 => Palette::Green,
            5 => Palette::White,
            _ => Palette::Gray,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Help,
    Playing,
    Paused,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The single owned world. Every mutable collection lives here and is only
/// touched from inside a tick or a command handler.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    /// Where leaving the help screen returns to.
    pub help_origin: GameStatus,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub asteroids: Vec<Asteroid>,
    pub power_ups: Vec<PowerUp>,
    /// Loose particles: sparks, exhaust, debris.
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub boss: Option<Boss>,
    pub bosses_defeated: u32,
    pub score: u32,
    /// Best score seen so far, updated live when the current score passes it.
    pub high_score: u32,
    pub stage: u32,
    pub stage_changed_at: Option<u64>,
    /// Flips once any tier 1..=3 enemy is shot down; unlocks the full tier table.
    pub low_tier_enemy_destroyed: bool,
    pub autopilot: bool,
    /// Autopilot setting applied to each new game.
    pub autopilot_default: bool,
    pub last_shot_at: u64,
    pub last_time_score_at: u64,
    pub game_over_at: Option<u64>,
    pub bomb_flash_until: u64,
    pub screen_shake_until: u64,
    pub shake_offset: (i32, i32),
    pub width: f32,
    pub height: f32,
}

impl GameState {
    /// A fresh world sitting at the main menu.
    pub fn new(width: f32, height: f32, high_score: u32) -> Self {
        Self {
            status: GameStatus::Menu,
            help_origin: GameStatus::Menu,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            boss: None,
            bosses_defeated: 0,
            score: 0,
            high_score,
            stage: 1,
            stage_changed_at: None,
            low_tier_enemy_destroyed: false,
            autopilot: false,
            autopilot_default: false,
            last_shot_at: 0,
            last_time_score_at: 0,
            game_over_at: None,
            bomb_flash_until: 0,
            screen_shake_until: 0,
            shake_offset: (0, 0),
            width,
            height,
        }
    }

    /// Clears the world for a new run and enters PLAYING.
    pub fn reset(&mut self, now: u64) {
        let high_score = self.high_score.max(self.score);
        let autopilot = self.autopilot_default;
        *self = GameState::new(self.width, self.height, high_score);
        self.autopilot_default = autopilot;
        self.autopilot = autopilot;
        self.last_time_score_at = now;
        self.status = GameStatus::Playing;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
