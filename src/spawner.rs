//! Stage-scaled creation of enemies, asteroids and the boss.
//!
//! All randomness comes through the injected `rng` so a seeded generator
//! reproduces a run exactly.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::constants::{
    ASTEROID_MAX_RADIUS, ASTEROID_MAX_SPEED, ASTEROID_MIN_RADIUS, ASTEROID_MIN_SPEED,
    ASTEROID_SPAWN_MARGIN, ASTEROID_SPAWN_RATE, BOSS_SPAWN_SCORE, ENEMY_SPAWN_RATE,
    LOW_TIER_PROBS, MAX_TIER_SHIFTS, MIN_ASTEROID_SPAWN_RATE, MIN_ENEMY_SPAWN_RATE,
    SPAWN_EDGE_OFFSET, TIER_SHIFT_FRACTION, TIER_SPAWN_PROBS,
};
use crate::entities::{Asteroid, Boss, Enemy, GameState};
use crate::geometry::{bearing, Vec2};

// ── Rate & tier tables ────────────────────────────────────────────────────────

/// Upper bound of the per-tick enemy draw; a draw of 0 spawns.
pub fn enemy_spawn_rate(stage: u32) -> u32 {
    ENEMY_SPAWN_RATE
        .saturating_sub(stage.saturating_mul(2))
        .max(MIN_ENEMY_SPAWN_RATE)
}

pub fn asteroid_spawn_rate(stage: u32) -> u32 {
    ASTEROID_SPAWN_RATE
        .saturating_sub(stage.saturating_mul(5))
        .max(MIN_ASTEROID_SPAWN_RATE)
}

/// Full tier distribution for `stage`: each later stage (up to three
/// times) moves 10% of every tier's mass up to the next tier.
pub fn tier_weights(stage: u32) -> [f64; 6] {
    let mut probs = TIER_SPAWN_PROBS;
    for _ in 0..stage.saturating_sub(1).min(MAX_TIER_SHIFTS) {
        for j in 0..probs.len() - 1 {
            let transfer = probs[j] * TIER_SHIFT_FRACTION;
            probs[j] -= transfer;
            probs[j + 1] += transfer;
        }
    }
    let total: f64 = probs.iter().sum();
    probs.map(|p| p / total)
}

/// Draws an enemy tier. Until the first low-tier kill only tiers 1..=3
/// can appear.
pub fn pick_tier(low_tier_destroyed: bool, stage: u32, rng: &mut impl Rng) -> u8 {
    let index = if low_tier_destroyed {
        weighted_index(&tier_weights(stage), rng)
    } else {
        weighted_index(&LOW_TIER_PROBS, rng)
    };
    index as u8 + 1
}

fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> usize {
    WeightedIndex::new(weights).map_or(0, |dist| dist.sample(rng))
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// A point `offset` units outside a uniformly chosen world edge.
pub fn edge_point(width: f32, height: f32, offset: f32, rng: &mut impl Rng) -> Vec2 {
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..=width), -offset),
        1 => Vec2::new(rng.gen_range(0.0..=width), height + offset),
        2 => Vec2::new(-offset, rng.gen_range(0.0..=height)),
        _ => Vec2::new(width + offset, rng.gen_range(0.0..=height)),
    }
}

pub fn spawn_enemy(tier: u8, width: f32, height: f32, rng: &mut impl Rng) -> Enemy {
    let pos = edge_point(width, height, SPAWN_EDGE_OFFSET, rng);
    let center = Vec2::new(width / 2.0, height / 2.0);
    Enemy::new(tier, pos, bearing(pos, center))
}

pub fn spawn_asteroid(width: f32, height: f32, rng: &mut impl Rng) -> Asteroid {
    let radius = rng.gen_range(ASTEROID_MIN_RADIUS..=ASTEROID_MAX_RADIUS);
    let speed = rng.gen_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED);
    let pos = edge_point(width, height, ASTEROID_SPAWN_MARGIN, rng);
    let target = Vec2::new(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height));
    let vel = (target - pos)
        .normalized()
        .map_or(Vec2::ZERO, |dir| dir * speed);
    Asteroid::new(pos, vel, radius)
}

// ── Per-tick spawning ─────────────────────────────────────────────────────────

pub fn boss_threshold(bosses_defeated: u32) -> u32 {
    BOSS_SPAWN_SCORE.saturating_mul(bosses_defeated + 1)
}

/// Brings in the boss once the score crosses the next threshold. The boss
/// arrives on an empty field: every enemy and enemy bullet is removed.
pub fn maybe_spawn_boss(state: &mut GameState) -> bool {
    if state.boss.is_some() || state.score < boss_threshold(state.bosses_defeated) {
        return false;
    }
    state.boss = Some(Boss::new(state.width));
    state.enemies.clear();
    state.enemy_bullets.clear();
    tracing::info!(
        score = state.score,
        bosses_defeated = state.bosses_defeated,
        "boss spawned"
    );
    true
}

/// One tick of spawning. Nothing but the boss spawns while a boss is alive.
pub fn spawn_tick(state: &mut GameState, rng: &mut impl Rng) {
    maybe_spawn_boss(state);
    if state.boss.is_some() {
        return;
    }

    if rng.gen_range(0..=enemy_spawn_rate(state.stage)) == 0 {
        let tier = pick_tier(state.low_tier_enemy_destroyed, state.stage, rng);
        let enemy = spawn_enemy(tier, state.width, state.height, rng);
        state.enemies.push(enemy);
    }

    if rng.gen_range(0..=asteroid_spawn_rate(state.stage)) == 0 {
        let asteroid = spawn_asteroid(state.width, state.height, rng);
        state.asteroids.push(asteroid);
    }
}
