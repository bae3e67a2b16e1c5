//! The PLAYING tick pipeline.
//!
//! One call to [`tick`] advances the world by exactly one step:
//! timers → player flight → autofire → spawning → entity updates →
//! collision resolution. All randomness comes through the injected `rng`
//! and all time through `now`, so callers control determinism (tests use a
//! seeded RNG and hand-picked timestamps).

use rand::Rng;

use crate::autopilot::{self, Decision};
use crate::collision;
use crate::constants::{
    BOMB_BOSS_DAMAGE, BOMB_FLASH_DURATION, BOMB_POINTS_PER_TIER, BOMB_SHAKE_DURATION,
    SCREEN_SHAKE_DURATION, SCREEN_SHAKE_INTENSITY, SHOOT_DELAY, STAGE_SCORE_INTERVAL,
    TIME_SCORE_AMOUNT, TIME_SCORE_INTERVAL,
};
use crate::entities::{Explosion, GameState, GameStatus, Palette, Particle};
use crate::geometry::Vec2;
use crate::spawner;

/// Held flight controls sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_up: bool,
    pub thrust_down: bool,
}

/// What happened during a tick that the driver may need to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The player died this tick and the game is now over.
    pub game_over: bool,
}

// ── Visual effects ────────────────────────────────────────────────────────────

/// Arms the screen shake for at least `duration` from `now`.
pub fn add_screen_shake(state: &mut GameState, now: u64, duration: u64) {
    state.screen_shake_until = state.screen_shake_until.max(now + duration);
}

pub fn create_explosion(
    state: &mut GameState,
    pos: Vec2,
    color: Palette,
    size: f32,
    now: u64,
    rng: &mut impl Rng,
) {
    state.explosions.push(Explosion::new(pos, color, size, rng));
    add_screen_shake(state, now, SCREEN_SHAKE_DURATION);
}

/// A burst of loose sparks flung out from one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkBurst {
    pub count: usize,
    /// Each velocity component is drawn from `[-spread, spread]`.
    pub spread: f32,
    pub color: Palette,
    pub size: f32,
    pub lifetime: u32,
}

pub const BOMBED_BULLET_SPARKS: SparkBurst = SparkBurst {
    count: 2,
    spread: 2.0,
    color: Palette::Red,
    size: 2.0,
    lifetime: 10,
};

pub const BOMBED_BOSS_SPARKS: SparkBurst = SparkBurst {
    count: 10,
    spread: 3.0,
    color: Palette::Purple,
    size: 4.0,
    lifetime: 20,
};

pub fn emit_sparks(state: &mut GameState, pos: Vec2, burst: SparkBurst, rng: &mut impl Rng) {
    for _ in 0..burst.count {
        let spark = Particle::spark(
            pos,
            burst.spread,
            burst.color,
            burst.size,
            burst.lifetime,
            rng,
        );
        state.particles.push(spark);
    }
}

fn update_screen_shake(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    state.shake_offset = if now < state.screen_shake_until {
        (
            rng.gen_range(-SCREEN_SHAKE_INTENSITY..=SCREEN_SHAKE_INTENSITY),
            rng.gen_range(-SCREEN_SHAKE_INTENSITY..=SCREEN_SHAKE_INTENSITY),
        )
    } else {
        (0, 0)
    };
}

fn emit_exhaust(state: &mut GameState, rng: &mut impl Rng) {
    let player = &state.player;
    if player.thrust <= 0.5 || !rng.gen_bool(0.5) {
        return;
    }
    let back = Vec2::from_heading(player.angle + 180.0);
    let pos = player.pos + back * 10.0;
    let jitter = Vec2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(-0.5..=0.5));
    let vel = back * (player.thrust * 0.5) + jitter;
    let color = [Palette::Orange, Palette::Yellow, Palette::Red][rng.gen_range(0..3)];
    state.particles.push(Particle::new(pos, vel, color, 2.0, 15));
}

// ── Scoring & stages ──────────────────────────────────────────────────────────

fn award_survival_score(state: &mut GameState, now: u64) {
    if now.saturating_sub(state.last_time_score_at) > TIME_SCORE_INTERVAL {
        state.add_score(TIME_SCORE_AMOUNT);
        state.last_time_score_at += TIME_SCORE_INTERVAL;
    }
}

pub fn stage_for_score(score: u32) -> u32 {
    score / STAGE_SCORE_INTERVAL + 1
}

fn update_stage(state: &mut GameState, now: u64) {
    let stage = stage_for_score(state.score);
    if stage > state.stage {
        tracing::info!(stage, score = state.score, "stage up");
        state.stage = stage;
        state.stage_changed_at = Some(now);
    }
}

// ── Player actions ────────────────────────────────────────────────────────────

/// Fires automatically on a fixed delay whenever the craft is not looping.
pub fn autofire(state: &mut GameState, now: u64) {
    if state.player.is_looping() || now.saturating_sub(state.last_shot_at) <= SHOOT_DELAY {
        return;
    }
    state.last_shot_at = now;
    let volley = state.player.shoot();
    state.bullets.extend(volley);
}

pub fn trigger_loop(state: &mut GameState, now: u64) -> bool {
    let started = state.player.start_loop(now);
    if started {
        tracing::debug!(now, "loop maneuver started");
    }
    started
}

/// Detonates a bomb: clears every enemy and enemy bullet and hits the boss
/// hard. Does nothing at all without a charge.
pub fn trigger_bomb(state: &mut GameState, now: u64, rng: &mut impl Rng) -> bool {
    if !state.player.use_bomb(now) {
        return false;
    }
    state.bomb_flash_until = now + BOMB_FLASH_DURATION;
    add_screen_shake(state, now, BOMB_SHAKE_DURATION);

    let enemies = std::mem::take(&mut state.enemies);
    for enemy in &enemies {
        create_explosion(state, enemy.pos, Palette::for_tier(enemy.tier), 2.0, now, rng);
        state.add_score(u32::from(enemy.tier) * BOMB_POINTS_PER_TIER);
    }

    let enemy_bullets = std::mem::take(&mut state.enemy_bullets);
    for bullet in &enemy_bullets {
        emit_sparks(state, bullet.pos, BOMBED_BULLET_SPARKS, rng);
    }

    if let Some(boss_pos) = state.boss.as_ref().map(|b| b.pos) {
        emit_sparks(state, boss_pos, BOMBED_BOSS_SPARKS, rng);
        let defeated = state
            .boss
            .as_mut()
            .is_some_and(|boss| boss.take_damage(BOMB_BOSS_DAMAGE));
        if defeated {
            collision::defeat_boss(state, now, rng);
        }
    }

    tracing::info!(
        cleared_enemies = enemies.len(),
        cleared_bullets = enemy_bullets.len(),
        bombs_left = state.player.bombs,
        "bomb detonated"
    );
    true
}

fn apply_autopilot(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    match autopilot::decide(state, now) {
        Decision::UseBomb => {
            trigger_bomb(state, now, rng);
        }
        Decision::StartLoop => {
            trigger_loop(state, now);
        }
        Decision::Steer { angle, thrust } => {
            state.player.angle = angle;
            state.player.thrust = thrust;
        }
    }
}

pub fn enter_game_over(state: &mut GameState, now: u64) {
    state.status = GameStatus::GameOver;
    state.game_over_at = Some(now);
    tracing::info!(
        score = state.score,
        stage = state.stage,
        bosses_defeated = state.bosses_defeated,
        "game over"
    );
}

// ── Entity updates ────────────────────────────────────────────────────────────

/// Runs every entity's update rule and drops whatever expired.
pub fn update_entities(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let (width, height) = (state.width, state.height);
    let target = state.player.pos;

    state.bullets.retain_mut(|b| b.update(width, height));

    let mut fired = Vec::new();
    for enemy in &mut state.enemies {
        enemy.update(target);
        if enemy.should_shoot(rng) {
            fired.push(enemy.shoot(now));
        }
    }

    state
        .enemy_bullets
        .retain_mut(|b| b.update(target, now, width, height));
    state.enemy_bullets.extend(fired);

    if let Some(boss) = state.boss.as_mut() {
        boss.update(width);
        if boss.should_shoot() {
            let volley = boss.shoot(target, now);
            state.enemy_bullets.extend(volley);
        }
    }

    state.asteroids.retain_mut(|a| a.update(width, height));
    state.power_ups.retain_mut(|p| p.update(width, height));
    state.particles.retain_mut(|p| p.update());
    state.explosions.retain_mut(|e| e.update());
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the PLAYING simulation by one tick.
pub fn tick(
    state: &mut GameState,
    controls: &Controls,
    now: u64,
    rng: &mut impl Rng,
) -> TickReport {
    update_screen_shake(state, now, rng);
    award_survival_score(state, now);
    update_stage(state, now);

    // ── 1. Player flight ─────────────────────────────────────────────────────
    state.player.update_loop(now);
    if !state.player.is_looping() {
        if state.autopilot {
            apply_autopilot(state, now, rng);
        } else {
            state.player.steer_manual(
                controls.rotate_left,
                controls.rotate_right,
                controls.thrust_up,
                controls.thrust_down,
            );
        }
        state.player.advance(state.width, state.height);
    }
    emit_exhaust(state, rng);
    autofire(state, now);

    // ── 2. Spawning ──────────────────────────────────────────────────────────
    spawner::spawn_tick(state, rng);

    // ── 3. Movement ──────────────────────────────────────────────────────────
    update_entities(state, now, rng);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let died = collision::resolve(state, now, rng);
    if died {
        enter_game_over(state, now);
    }

    TickReport { game_over: died }
}
