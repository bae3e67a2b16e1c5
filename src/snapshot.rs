//! Read-only view of one frame for the renderer.
//!
//! The snapshot borrows the live collections instead of copying them, so
//! building one every frame costs a handful of scalar reads.

use crate::constants::STAGE_TRANSITION_DURATION;
use crate::entities::{
    Asteroid, Boss, Bullet, Enemy, EnemyBullet, Explosion, GameState, GameStatus, Particle,
    Player, PowerUp,
};

/// Scalars shown in the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub stage: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub max_shield: i32,
    pub weapon_tier: u8,
    pub bombs: u32,
    pub loop_ready: bool,
    pub autopilot: bool,
    /// `(hp, max_hp, phase)` while a boss is alive.
    pub boss: Option<(i32, i32, u8)>,
}

#[derive(Clone, Debug)]
pub struct RenderSnapshot<'a> {
    pub status: GameStatus,
    /// Status underneath the help screen.
    pub help_origin: GameStatus,
    pub width: f32,
    pub height: f32,
    pub player: &'a Player,
    pub player_invincible: bool,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub enemy_bullets: &'a [EnemyBullet],
    pub asteroids: &'a [Asteroid],
    pub power_ups: &'a [PowerUp],
    pub particles: &'a [Particle],
    pub explosions: &'a [Explosion],
    pub boss: Option<&'a Boss>,
    pub hud: Hud,
    pub shake_offset: (i32, i32),
    pub bomb_flash_until: u64,
    pub bomb_flash: bool,
    pub stage_banner: bool,
}

pub fn snapshot(state: &GameState, now: u64) -> RenderSnapshot<'_> {
    let player = &state.player;
    let hud = Hud {
        score: state.score,
        high_score: state.high_score,
        stage: state.stage,
        hp: player.hp,
        max_hp: player.max_hp,
        shield: player.shield,
        max_shield: player.max_shield,
        weapon_tier: player.weapon_tier,
        bombs: player.bombs,
        loop_ready: player.loop_ready(now) && !player.is_looping(),
        autopilot: state.autopilot,
        boss: state.boss.as_ref().map(|b| (b.hp, b.max_hp, b.phase)),
    };

    RenderSnapshot {
        status: state.status,
        help_origin: state.help_origin,
        width: state.width,
        height: state.height,
        player,
        player_invincible: player.is_invincible(now),
        bullets: &state.bullets,
        enemies: &state.enemies,
        enemy_bullets: &state.enemy_bullets,
        asteroids: &state.asteroids,
        power_ups: &state.power_ups,
        particles: &state.particles,
        explosions: &state.explosions,
        boss: state.boss.as_ref(),
        hud,
        shake_offset: state.shake_offset,
        bomb_flash_until: state.bomb_flash_until,
        bomb_flash: now < state.bomb_flash_until,
        stage_banner: state
            .stage_changed_at
            .is_some_and(|at| now.saturating_sub(at) < STAGE_TRANSITION_DURATION),
    }
}
