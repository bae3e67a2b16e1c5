use retro_shooter::constants::*;
use retro_shooter::entities::*;
use retro_shooter::geometry::{bearing, wrap_degrees, Vec2};
use retro_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let mut state = GameState::new(WORLD_WIDTH, WORLD_HEIGHT, 0);
    state.reset(0);
    state
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Rates & tier tables ───────────────────────────────────────────────────────

#[test]
fn spawn_rates_tighten_with_stage_then_floor() {
    assert_eq!(enemy_spawn_rate(1), 48);
    assert_eq!(enemy_spawn_rate(10), 30);
    assert_eq!(enemy_spawn_rate(40), MIN_ENEMY_SPAWN_RATE);
    assert_eq!(asteroid_spawn_rate(1), 95);
    assert_eq!(asteroid_spawn_rate(14), MIN_ASTEROID_SPAWN_RATE);
}

#[test]
fn tier_weights_are_normalized() {
    for stage in 1..12 {
        let total: f64 = tier_weights(stage).iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "stage {stage}");
    }
}

#[test]
fn stage_one_uses_base_table() {
    let weights = tier_weights(1);
    for (w, base) in weights.iter().zip(TIER_SPAWN_PROBS) {
        assert!((w - base).abs() < 1e-9);
    }
}

#[test]
fn later_stages_shift_mass_upward() {
    let w1 = tier_weights(1);
    let w2 = tier_weights(2);
    assert!((w2[0] - 0.36).abs() < 1e-9);
    assert!(w2[5] > w1[5]);
}

#[test]
fn tier_shift_stops_after_three_stages() {
    assert_eq!(tier_weights(4), tier_weights(10));
    assert_ne!(tier_weights(3), tier_weights(4));
}

#[test]
fn only_low_tiers_before_first_low_tier_kill() {
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        let tier = pick_tier(false, 10, &mut rng);
        assert!((1..=3).contains(&tier));
    }
}

#[test]
fn full_table_unlocks_after_low_tier_kill() {
    let mut rng = seeded_rng();
    let tiers: Vec<u8> = (0..3000).map(|_| pick_tier(true, 4, &mut rng)).collect();
    assert!(tiers.iter().all(|t| (1..=6).contains(t)));
    assert!(tiers.iter().any(|&t| t >= 4));
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn edge_points_sit_outside_the_world() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let p = edge_point(WORLD_WIDTH, WORLD_HEIGHT, SPAWN_EDGE_OFFSET, &mut rng);
        let on_edge = p.y == -SPAWN_EDGE_OFFSET
            || p.y == WORLD_HEIGHT + SPAWN_EDGE_OFFSET
            || p.x == -SPAWN_EDGE_OFFSET
            || p.x == WORLD_WIDTH + SPAWN_EDGE_OFFSET;
        assert!(on_edge, "{p:?}");
    }
}

#[test]
fn spawned_enemy_faces_centre() {
    let mut rng = seeded_rng();
    let centre = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    for _ in 0..20 {
        let e = spawn_enemy(2, WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
        assert_eq!(e.tier, 2);
        assert!(wrap_degrees(e.angle - bearing(e.pos, centre)).abs() < 1e-3);
    }
}

#[test]
fn spawned_asteroid_is_in_range() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let a = spawn_asteroid(WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
        assert!((ASTEROID_MIN_RADIUS..=ASTEROID_MAX_RADIUS).contains(&a.radius));
        let speed = a.vel.length();
        assert!(speed >= ASTEROID_MIN_SPEED - 1e-3 && speed <= ASTEROID_MAX_SPEED + 1e-3);
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_threshold_grows_with_defeats() {
    assert_eq!(boss_threshold(0), 500);
    assert_eq!(boss_threshold(1), 1000);
    assert_eq!(boss_threshold(3), 2000);
}

#[test]
fn boss_arrives_on_an_empty_field() {
    let mut s = make_state();
    s.score = 500;
    s.enemies.push(Enemy::new(1, Vec2::new(10.0, 10.0), 0.0));
    s.enemy_bullets
        .push(EnemyBullet::new(Vec2::new(20.0, 20.0), Vec2::ZERO, 1, 0));
    s.asteroids
        .push(Asteroid::new(Vec2::new(30.0, 30.0), Vec2::ZERO, 8));

    assert!(maybe_spawn_boss(&mut s));
    assert!(s.boss.is_some());
    assert!(s.enemies.is_empty());
    assert!(s.enemy_bullets.is_empty());
    // Asteroids are left alone.
    assert_eq!(s.asteroids.len(), 1);

    // Only one boss at a time.
    assert!(!maybe_spawn_boss(&mut s));
}

#[test]
fn no_boss_below_threshold() {
    let mut s = make_state();
    s.score = 900;
    s.bosses_defeated = 1;
    assert!(!maybe_spawn_boss(&mut s));
    assert!(s.boss.is_none());
}

#[test]
fn nothing_else_spawns_during_boss_fight() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.boss = Some(Boss::new(WORLD_WIDTH));
    for _ in 0..1000 {
        spawn_tick(&mut s, &mut rng);
    }
    assert!(s.enemies.is_empty());
    assert!(s.asteroids.is_empty());
}

#[test]
fn spawn_tick_populates_over_time() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    for _ in 0..1000 {
        spawn_tick(&mut s, &mut rng);
    }
    assert!(!s.enemies.is_empty());
    assert!(!s.asteroids.is_empty());
    assert!(s.enemies.iter().all(|e| e.tier <= 3));
}
