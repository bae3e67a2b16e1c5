//! Pairwise collision resolution.
//!
//! Every test is a circle-vs-circle distance check, run once per tick after
//! all movement. Removals are marked during the scan and compacted after
//! it, so no collection is mutated while it is being walked.
//!
//! Per player bullet the categories are tried in a fixed priority order and
//! a bullet that is consumed stops there:
//!
//! 1. enemy bullet (both destroyed)
//! 2. boss
//! 3. enemy
//! 4. asteroid

use rand::Rng;

use crate::compute::{add_screen_shake, create_explosion, emit_sparks, SparkBurst};
use crate::constants::{
    ASTEROID_DROP_CHANCE, BOSS_POINTS, BOSS_POWER_UP_DROPS, BULLET_VS_ENEMY,
    BULLET_VS_ENEMY_BULLET, ENEMY_BULLET_VS_PLAYER, ENEMY_DROP_BASE, ENEMY_DROP_PER_TIER,
    ENEMY_VS_PLAYER, HIT_SHAKE_DURATION, LOW_TIER_MAX, POWER_UP_PICKUP,
};
use crate::entities::{GameState, Palette, PowerUp, PowerUpKind};
use crate::geometry::Vec2;

const BULLET_CLASH_SPARKS: SparkBurst = SparkBurst {
    count: 3,
    spread: 2.0,
    color: Palette::White,
    size: 1.0,
    lifetime: 10,
};

const BOSS_HIT_SPARKS: SparkBurst = SparkBurst {
    count: 8,
    spread: 2.0,
    color: Palette::Orange,
    size: 3.0,
    lifetime: 15,
};

const ENEMY_HIT_SPARKS: SparkBurst = SparkBurst {
    count: 5,
    spread: 1.0,
    color: Palette::Yellow,
    size: 2.0,
    lifetime: 12,
};

const PLAYER_HIT_SPARKS: SparkBurst = SparkBurst {
    count: 8,
    spread: 3.0,
    color: Palette::Red,
    size: 2.0,
    lifetime: 15,
};

/// Resolves every interaction for this tick. Returns `true` when the player
/// died.
pub fn resolve(state: &mut GameState, now: u64, rng: &mut impl Rng) -> bool {
    resolve_player_bullets(state, now, rng);
    let died = resolve_player_contacts(state, now, rng);
    collect_power_ups(state);
    died
}

// ── Player bullets ────────────────────────────────────────────────────────────

pub fn resolve_player_bullets(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let mut spent = vec![false; state.bullets.len()];
    let mut enemy_bullet_gone = vec![false; state.enemy_bullets.len()];
    let mut enemy_gone = vec![false; state.enemies.len()];
    let mut asteroid_gone = vec![false; state.asteroids.len()];

    for bi in 0..state.bullets.len() {
        let pos = state.bullets[bi].pos;

        // (a) bullet vs enemy bullet
        let clash = state
            .enemy_bullets
            .iter()
            .enumerate()
            .position(|(i, eb)| {
                !enemy_bullet_gone[i] && pos.distance(eb.pos) < BULLET_VS_ENEMY_BULLET
            });
        if let Some(ei) = clash {
            spent[bi] = true;
            enemy_bullet_gone[ei] = true;
            emit_sparks(state, pos, BULLET_CLASH_SPARKS, rng);
            continue;
        }

        // (b) bullet vs boss
        if let Some(boss) = state.boss.as_mut() {
            if pos.distance(boss.pos) < boss.size {
                spent[bi] = true;
                let boss_pos = boss.pos;
                let dead = boss.take_damage(1);
                emit_sparks(state, boss_pos, BOSS_HIT_SPARKS, rng);
                if dead {
                    defeat_boss(state, now, rng);
                }
                continue;
            }
        }

        // (c) bullet vs enemy
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .position(|(i, e)| !enemy_gone[i] && pos.distance(e.pos) < BULLET_VS_ENEMY);
        if let Some(ei) = hit {
            spent[bi] = true;
            let enemy_pos = state.enemies[ei].pos;
            emit_sparks(state, enemy_pos, ENEMY_HIT_SPARKS, rng);
            if state.enemies[ei].take_damage(1) {
                enemy_gone[ei] = true;
                destroy_enemy(state, ei, now, rng);
            }
            continue;
        }

        // (d) bullet vs asteroid
        let hit = state.asteroids.iter().enumerate().position(|(i, a)| {
            !asteroid_gone[i] && pos.distance(a.pos) < a.radius as f32
        });
        if let Some(ai) = hit {
            spent[bi] = true;
            asteroid_gone[ai] = true;
            let asteroid = &state.asteroids[ai];
            let (asteroid_pos, radius) = (asteroid.pos, asteroid.radius);
            let debris = SparkBurst {
                count: radius as usize,
                spread: 2.0,
                color: Palette::Gray,
                size: 3.0,
                lifetime: 20,
            };
            emit_sparks(state, asteroid_pos, debris, rng);
            if rng.gen_bool(ASTEROID_DROP_CHANCE) {
                state.power_ups.push(PowerUp::random(asteroid_pos, rng));
            }
        }
    }

    compact(&mut state.bullets, &spent);
    compact(&mut state.enemy_bullets, &enemy_bullet_gone);
    compact(&mut state.enemies, &enemy_gone);
    compact(&mut state.asteroids, &asteroid_gone);
}

/// Drops every element whose flag is set, preserving order.
fn compact<T>(items: &mut Vec<T>, gone: &[bool]) {
    let mut flags = gone.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}

/// Rewards and effects for an enemy shot down. The caller removes it.
fn destroy_enemy(state: &mut GameState, index: usize, now: u64, rng: &mut impl Rng) {
    let enemy = state.enemies[index].clone();
    if enemy.tier <= LOW_TIER_MAX {
        state.low_tier_enemy_destroyed = true;
    }
    state.add_score(enemy.points());
    let size = f32::from(enemy.tier) * 0.5;
    create_explosion(state, enemy.pos, Palette::for_tier(enemy.tier), size, now, rng);
    if rng.gen_bool(enemy_drop_chance(enemy.tier)) {
        state.power_ups.push(PowerUp::random(enemy.pos, rng));
    }
}

pub fn enemy_drop_chance(tier: u8) -> f64 {
    (ENEMY_DROP_BASE + ENEMY_DROP_PER_TIER * f64::from(tier)).min(1.0)
}

/// Removes the boss and pays out: points, a ring of explosions and a fixed
/// number of power-ups.
pub fn defeat_boss(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let Some(boss) = state.boss.take() else {
        return;
    };
    state.add_score(BOSS_POINTS);
    state.bosses_defeated += 1;

    for _ in 0..5 {
        let offset = Vec2::new(rng.gen_range(-20.0..=20.0), rng.gen_range(-20.0..=20.0));
        let color = [Palette::Purple, Palette::Orange, Palette::Red][rng.gen_range(0..3)];
        create_explosion(state, boss.pos + offset, color, 3.0, now, rng);
    }
    for _ in 0..BOSS_POWER_UP_DROPS {
        let offset = Vec2::new(rng.gen_range(-30.0..=30.0), rng.gen_range(-30.0..=30.0));
        state.power_ups.push(PowerUp::random(boss.pos + offset, rng));
    }

    tracing::info!(
        score = state.score,
        bosses_defeated = state.bosses_defeated,
        "boss defeated"
    );
}

// ── Player contacts ───────────────────────────────────────────────────────────

/// Enemy bodies, enemy bullets and the boss body all hurt the player through
/// [`damage_player`]. Returns `true` when one of them was fatal.
///
/// An enemy bullet is spent only when its hit lands. Against an invincible
/// or looping player it stays live and can hit again later.
pub fn resolve_player_contacts(state: &mut GameState, now: u64, rng: &mut impl Rng) -> bool {
    let player_pos = state.player.pos;

    let enemy_contacts = state
        .enemies
        .iter()
        .filter(|e| e.pos.distance(player_pos) < ENEMY_VS_PLAYER)
        .count();
    for _ in 0..enemy_contacts {
        if damage_player(state, 1, now, rng) {
            return true;
        }
    }

    let mut spent = vec![false; state.enemy_bullets.len()];
    let mut died = false;
    for (i, flag) in spent.iter_mut().enumerate() {
        if state.enemy_bullets[i].pos.distance(player_pos) >= ENEMY_BULLET_VS_PLAYER {
            continue;
        }
        let before = (state.player.hp, state.player.shield);
        died = damage_player(state, 1, now, rng);
        *flag = (state.player.hp, state.player.shield) != before;
        if died {
            break;
        }
    }
    compact(&mut state.enemy_bullets, &spent);
    if died {
        return true;
    }

    let boss_contact = state
        .boss
        .as_ref()
        .is_some_and(|b| b.pos.distance(player_pos) < b.size);
    boss_contact && damage_player(state, 1, now, rng)
}

/// The single damage path for the player. Returns `true` on the killing blow.
pub fn damage_player(state: &mut GameState, amount: i32, now: u64, rng: &mut impl Rng) -> bool {
    let (hp, shield) = (state.player.hp, state.player.shield);
    let dead = state.player.take_damage(amount, now);
    let pos = state.player.pos;

    if dead {
        create_explosion(state, pos, Palette::White, 2.0, now, rng);
    } else if hp != state.player.hp || shield != state.player.shield {
        add_screen_shake(state, now, HIT_SHAKE_DURATION);
        emit_sparks(state, pos, PLAYER_HIT_SPARKS, rng);
    }
    dead
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub fn collect_power_ups(state: &mut GameState) {
    let player_pos = state.player.pos;
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        let touching = p.pos.distance(player_pos) < POWER_UP_PICKUP;
        if touching {
            collected.push(p.kind);
        }
        !touching
    });
    for kind in collected {
        apply_power_up(state, kind);
    }
}

pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let player = &mut state.player;
    match kind {
        PowerUpKind::Weapon => player.upgrade_weapon(),
        PowerUpKind::Health => player.heal(1),
        PowerUpKind::Shield => player.add_shield(1),
        PowerUpKind::Bomb => player.add_bomb(),
    }
}
