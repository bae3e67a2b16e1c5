//! Potential-field autopilot.
//!
//! [`decide`] looks at the world and picks exactly one action for this
//! tick: detonate a bomb, start a loop, or a new heading and thrust. It
//! never mutates anything; [`crate::compute`] applies the decision.

use crate::constants::{
    BOSS_STANDOFF, EMERGENCY_DODGE_RADIUS, ENEMY_STANDOFF, MAX_THRUST, NEARBY_BULLET_RADIUS,
    NEARBY_ENEMY_RADIUS, PERCEPTION_RADIUS, PREFERRED_TARGET_RADIUS, ROTATION_SPEED,
    STANDOFF_TOLERANCE, THRUST_ACCEL,
};
use crate::entities::{GameState, PowerUpKind};
use crate::geometry::{turn_toward, Vec2};

const ENEMY_THREAT_PER_TIER: f32 = 6.0;
const ASTEROID_THREAT: f32 = 3.0;
const BULLET_THREAT: f32 = 25.0;
const BOSS_THREAT: f32 = 50.0;
/// Threats at least this heavy are worth a loop instead of a dodge.
const LOOP_WORTHY_THREAT: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    UseBomb,
    StartLoop,
    /// Absolute heading (degrees) and thrust for this tick.
    Steer { angle: f32, thrust: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threat {
    pub pos: Vec2,
    pub weight: f32,
    pub dist: f32,
}

/// Everything that can hurt the player, with its distance.
pub fn threats(state: &GameState) -> Vec<Threat> {
    let origin = state.player.pos;
    let threat = |pos: Vec2, weight: f32| Threat {
        pos,
        weight,
        dist: origin.distance(pos),
    };

    let enemies = state
        .enemies
        .iter()
        .map(|e| threat(e.pos, ENEMY_THREAT_PER_TIER * f32::from(e.tier)));
    let asteroids = state.asteroids.iter().map(|a| threat(a.pos, ASTEROID_THREAT));
    let bullets = state
        .enemy_bullets
        .iter()
        .map(|b| threat(b.pos, BULLET_THREAT));
    let boss = state.boss.iter().map(|b| threat(b.pos, BOSS_THREAT));

    enemies.chain(asteroids).chain(bullets).chain(boss).collect()
}

/// Enemy bullets and enemies inside their perception sub-radii.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Danger {
    pub nearby_bullets: usize,
    pub nearby_enemies: usize,
}

impl Danger {
    pub fn assess(state: &GameState) -> Self {
        let origin = state.player.pos;
        Self {
            nearby_bullets: state
                .enemy_bullets
                .iter()
                .filter(|b| origin.distance(b.pos) < NEARBY_BULLET_RADIUS)
                .count(),
            nearby_enemies: state
                .enemies
                .iter()
                .filter(|e| origin.distance(e.pos) < NEARBY_ENEMY_RADIUS)
                .count(),
        }
    }

    pub fn score(&self) -> usize {
        2 * self.nearby_bullets + self.nearby_enemies
    }
}

pub fn decide(state: &GameState, now: u64) -> Decision {
    let player = &state.player;
    let threats = threats(state);
    let danger = Danger::assess(state);
    let hp_ratio = player.hp_ratio();
    let loop_available = player.loop_ready(now) && !player.is_looping();

    // ── Abilities ────────────────────────────────────────────────────────────
    if player.bombs > 0 && !player.is_looping() {
        let desperate = hp_ratio <= 0.33 && danger.score() >= 4;
        if desperate || danger.nearby_bullets >= 6 {
            return Decision::UseBomb;
        }
    }
    if loop_available && (danger.score() >= 5 || danger.nearby_bullets >= 4) {
        return Decision::StartLoop;
    }

    // ── Emergency dodge ──────────────────────────────────────────────────────
    let nearest = threats
        .iter()
        .filter(|t| t.dist < EMERGENCY_DODGE_RADIUS)
        .min_by(|a, b| a.dist.total_cmp(&b.dist));
    if let Some(threat) = nearest {
        if loop_available && threat.weight >= LOOP_WORTHY_THREAT {
            return Decision::StartLoop;
        }
        let angle = (player.pos - threat.pos)
            .normalized()
            .map_or(player.angle, |away| {
                turn_toward(player.angle, away.heading(), ROTATION_SPEED)
            });
        return Decision::Steer {
            angle,
            thrust: MAX_THRUST,
        };
    }

    // ── Potential field ──────────────────────────────────────────────────────
    let repulsion = repulsion(player.pos, &threats);
    let repulsion_magnitude = repulsion.length();
    let target = pick_target(state);

    let mut steer = repulsion;
    if let Some(target) = target {
        let mut weight = if hp_ratio > 0.5 { 0.3 } else { 0.15 };
        if repulsion_magnitude > 1.0 {
            weight /= repulsion_magnitude * 2.0;
        }
        if let Some(dir) = (target.pos - player.pos).normalized() {
            steer += dir * weight;
        }
    }

    let angle = if steer.x.abs() > 0.01 || steer.y.abs() > 0.01 {
        turn_toward(player.angle, steer.heading(), ROTATION_SPEED)
    } else {
        player.angle
    };

    Decision::Steer {
        angle,
        thrust: thrust_policy(state, player.thrust, repulsion_magnitude, target),
    }
}

/// Sum of pushes away from every threat inside the perception radius,
/// strongest for heavy, close threats.
pub fn repulsion(origin: Vec2, threats: &[Threat]) -> Vec2 {
    threats
        .iter()
        .filter(|t| t.dist < PERCEPTION_RADIUS)
        .fold(Vec2::ZERO, |acc, t| {
            let weight = t.weight / (t.dist * t.dist + 1.0);
            acc + (origin - t.pos) * (weight / (t.dist + 0.1))
        })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    /// Enemies and the boss are engaged at stand-off range.
    pub hostile: bool,
}

/// Attraction target, in priority order: a health pickup when hurt, a
/// shield pickup when unshielded, then enemies, the boss, any pickup.
pub fn pick_target(state: &GameState) -> Option<Target> {
    let origin = state.player.pos;
    let nearest_pickup = |kind: Option<PowerUpKind>| {
        state
            .power_ups
            .iter()
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .min_by(|a, b| origin.distance(a.pos).total_cmp(&origin.distance(b.pos)))
            .map(|p| Target {
                pos: p.pos,
                hostile: false,
            })
    };

    let wanted = if state.player.hp_ratio() <= 0.5 {
        nearest_pickup(Some(PowerUpKind::Health))
    } else if state.player.shield == 0 {
        nearest_pickup(Some(PowerUpKind::Shield))
    } else {
        None
    };
    if wanted.is_some() {
        return wanted;
    }

    if !state.enemies.is_empty() {
        let close = state
            .enemies
            .iter()
            .filter(|e| origin.distance(e.pos) < PREFERRED_TARGET_RADIUS)
            .min_by(|a, b| {
                a.tier
                    .cmp(&b.tier)
                    .then(origin.distance(a.pos).total_cmp(&origin.distance(b.pos)))
            });
        let chosen = close.or_else(|| {
            state
                .enemies
                .iter()
                .min_by(|a, b| origin.distance(a.pos).total_cmp(&origin.distance(b.pos)))
        });
        return chosen.map(|e| Target {
            pos: e.pos,
            hostile: true,
        });
    }

    if let Some(boss) = &state.boss {
        return Some(Target {
            pos: boss.pos,
            hostile: true,
        });
    }

    nearest_pickup(None)
}

fn thrust_policy(
    state: &GameState,
    thrust: f32,
    repulsion_magnitude: f32,
    target: Option<Target>,
) -> f32 {
    match target {
        _ if repulsion_magnitude > 0.5 => (thrust + THRUST_ACCEL * 2.0).min(MAX_THRUST),
        Some(target) if target.hostile => {
            let dist = state.player.pos.distance(target.pos);
            let standoff = if state.boss.is_some() {
                BOSS_STANDOFF
            } else {
                ENEMY_STANDOFF
            };
            if dist > standoff {
                (thrust + THRUST_ACCEL).min(MAX_THRUST)
            } else if dist < standoff - STANDOFF_TOLERANCE {
                (thrust - THRUST_ACCEL * 2.0).max(0.0)
            } else {
                (thrust + THRUST_ACCEL * 0.5).min(MAX_THRUST * 0.6)
            }
        }
        Some(_) => (thrust + THRUST_ACCEL).min(MAX_THRUST),
        None => (thrust - THRUST_ACCEL).max(0.0),
    }
}
