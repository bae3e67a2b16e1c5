use retro_shooter::compute::*;
use retro_shooter::constants::*;
use retro_shooter::entities::*;
use retro_shooter::geometry::Vec2;

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

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── Stages ────────────────────────────────────────────────────────────────────

#[test]
fn stage_follows_score() {
    assert_eq!(stage_for_score(0), 1);
    assert_eq!(stage_for_score(199), 1);
    assert_eq!(stage_for_score(200), 2);
    assert_eq!(stage_for_score(1000), 6);
}

#[test]
fn tick_raises_stage_and_records_banner_time() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.score = 400;
    tick(&mut s, &Controls::default(), 50, &mut rng);
    assert_eq!(s.stage, 3);
    assert_eq!(s.stage_changed_at, Some(50));
}

#[test]
fn survival_score_every_ten_seconds() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    tick(&mut s, &Controls::default(), TIME_SCORE_INTERVAL, &mut rng);
    assert_eq!(s.score, 0);
    tick(&mut s, &Controls::default(), TIME_SCORE_INTERVAL + 1, &mut rng);
    assert_eq!(s.score, TIME_SCORE_AMOUNT);
    assert_eq!(s.last_time_score_at, TIME_SCORE_INTERVAL);
}

// ── Tick pipeline ─────────────────────────────────────────────────────────────

#[test]
fn bullet_moves_one_step_per_tick() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.player.angle = 0.0;
    let start = s.player.pos;
    s.bullets = s.player.shoot();
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].pos, start);

    update_entities(&mut s, 10, &mut rng);
    assert_eq!(s.bullets.len(), 1);
    assert!(approx(s.bullets[0].pos.x, start.x + BULLET_SPEED));
    assert!(approx(s.bullets[0].pos.y, start.y));
}

#[test]
fn bullet_pruned_past_world_width() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.bullets.push(Bullet::new(
        Vec2::new(WORLD_WIDTH - 3.0, 100.0),
        Vec2::from_heading(0.0) * BULLET_SPEED,
    ));
    update_entities(&mut s, 10, &mut rng);
    assert!(s.bullets.is_empty());
}

#[test]
fn manual_controls_steer_the_player() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let controls = Controls {
        rotate_left: true,
        thrust_up: true,
        ..Controls::default()
    };
    tick(&mut s, &controls, 10, &mut rng);
    assert!(approx(s.player.angle, -90.0 - ROTATION_SPEED));
    assert!(s.player.thrust > 0.0);
}

#[test]
fn lethal_contact_ends_game_once() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.player.hp = 1;
    let player_pos = s.player.pos;
    // Heading straight down, away from the autofire stream.
    s.enemies.push(Enemy::new(6, player_pos, 90.0));

    let report = tick(&mut s, &Controls::default(), 200, &mut rng);
    assert!(report.game_over);
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.game_over_at, Some(200));
    assert_eq!(s.player.hp, 0);
    assert!(!s.explosions.is_empty());
}

#[test]
fn looping_player_ignores_controls() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    assert!(trigger_loop(&mut s, 0));
    let controls = Controls {
        rotate_right: true,
        ..Controls::default()
    };
    tick(&mut s, &controls, 100, &mut rng);
    assert!(s.player.is_looping());
    assert!(s.bullets.is_empty());
}

// ── Autofire ──────────────────────────────────────────────────────────────────

#[test]
fn autofire_respects_shot_delay() {
    let mut s = make_state();
    autofire(&mut s, SHOOT_DELAY);
    assert!(s.bullets.is_empty());
    autofire(&mut s, SHOOT_DELAY + 1);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.last_shot_at, SHOOT_DELAY + 1);
    autofire(&mut s, SHOOT_DELAY + 2);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn autofire_uses_weapon_tier() {
    let mut s = make_state();
    s.player.weapon_tier = 3;
    autofire(&mut s, 1000);
    assert_eq!(s.bullets.len(), 3);
}

#[test]
fn no_autofire_while_looping() {
    let mut s = make_state();
    trigger_loop(&mut s, 0);
    autofire(&mut s, 1000);
    assert!(s.bullets.is_empty());
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

fn crowded_state() -> GameState {
    let mut s = make_state();
    s.enemies.push(Enemy::new(2, Vec2::new(50.0, 50.0), 0.0));
    s.enemies.push(Enemy::new(3, Vec2::new(300.0, 80.0), 0.0));
    s.enemy_bullets
        .push(EnemyBullet::new(Vec2::new(60.0, 60.0), Vec2::new(0.0, 3.0), 1, 0));
    s
}

#[test]
fn bomb_without_charge_is_noop() {
    let mut s = crowded_state();
    let mut rng = seeded_rng();
    s.player.bombs = 0;
    assert!(!trigger_bomb(&mut s, 1000, &mut rng));
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.enemy_bullets.len(), 1);
    assert_eq!(s.score, 0);
    assert_eq!(s.bomb_flash_until, 0);
    assert!(s.explosions.is_empty());
}

#[test]
fn bomb_clears_field_and_scores() {
    let mut s = crowded_state();
    let mut rng = seeded_rng();
    assert!(trigger_bomb(&mut s, 1000, &mut rng));
    assert!(s.enemies.is_empty());
    assert!(s.enemy_bullets.is_empty());
    assert_eq!(s.score, 2 * BOMB_POINTS_PER_TIER + 3 * BOMB_POINTS_PER_TIER);
    assert_eq!(s.player.bombs, 1);
    assert_eq!(s.player.invincible_until, 1000 + BOMB_INVINCIBILITY);
    assert_eq!(s.bomb_flash_until, 1000 + BOMB_FLASH_DURATION);
    assert!(s.screen_shake_until >= 1000 + BOMB_SHAKE_DURATION);
    assert_eq!(s.explosions.len(), 2);
    // Bomb kills do not count as low-tier kills.
    assert!(!s.low_tier_enemy_destroyed);
}

#[test]
fn bomb_damages_boss() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.boss = Some(Boss::with_hp(WORLD_WIDTH, 100, BOSS_HP));
    trigger_bomb(&mut s, 0, &mut rng);
    assert_eq!(s.boss.as_ref().map(|b| b.hp), Some(100 - BOMB_BOSS_DAMAGE));
}

#[test]
fn bomb_can_finish_the_boss() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.boss = Some(Boss::with_hp(WORLD_WIDTH, 30, BOSS_HP));
    trigger_bomb(&mut s, 0, &mut rng);
    assert!(s.boss.is_none());
    assert_eq!(s.bosses_defeated, 1);
    assert_eq!(s.score, BOSS_POINTS);
    assert_eq!(s.power_ups.len(), BOSS_POWER_UP_DROPS);
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[test]
fn explosion_arms_screen_shake() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    create_explosion(&mut s, Vec2::new(10.0, 10.0), Palette::Red, 1.0, 500, &mut rng);
    assert_eq!(s.explosions.len(), 1);
    assert_eq!(s.screen_shake_until, 500 + SCREEN_SHAKE_DURATION);
}

#[test]
fn screen_shake_never_shortens() {
    let mut s = make_state();
    add_screen_shake(&mut s, 0, 400);
    add_screen_shake(&mut s, 100, 100);
    assert_eq!(s.screen_shake_until, 400);
}

#[test]
fn sparks_follow_burst_recipe() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    emit_sparks(&mut s, Vec2::ZERO, BOMBED_BOSS_SPARKS, &mut rng);
    assert_eq!(s.particles.len(), BOMBED_BOSS_SPARKS.count);
    assert!(s
        .particles
        .iter()
        .all(|p| p.color == Palette::Purple && p.vel.x.abs() <= BOMBED_BOSS_SPARKS.spread));
}

#[test]
fn shake_offset_settles_when_disarmed() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    add_screen_shake(&mut s, 0, 100);
    tick(&mut s, &Controls::default(), 50, &mut rng);
    let (dx, dy) = s.shake_offset;
    assert!(dx.abs() <= SCREEN_SHAKE_INTENSITY && dy.abs() <= SCREEN_SHAKE_INTENSITY);
    s.screen_shake_until = 0;
    tick(&mut s, &Controls::default(), 5000, &mut rng);
    assert_eq!(s.shake_offset, (0, 0));
}
