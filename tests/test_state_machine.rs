use retro_shooter::constants::*;
use retro_shooter::entities::*;
use retro_shooter::geometry::Vec2;
use retro_shooter::snapshot::snapshot;
use retro_shooter::state::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    GameState::new(WORLD_WIDTH, WORLD_HEIGHT, 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn playing() -> GameState {
    let mut s = make_state();
    s.reset(0);
    s
}

fn game_over_at(at: u64) -> GameState {
    let mut s = playing();
    s.status = GameStatus::GameOver;
    s.game_over_at = Some(at);
    s
}

// ── Menu & help ───────────────────────────────────────────────────────────────

#[test]
fn confirm_starts_a_game() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    assert_eq!(apply_command(&mut s, Command::Confirm, 500, &mut rng), Flow::Continue);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.last_time_score_at, 500);
}

#[test]
fn new_game_uses_autopilot_default() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.autopilot_default = true;
    apply_command(&mut s, Command::Confirm, 0, &mut rng);
    assert!(s.autopilot);
}

#[test]
fn escape_at_menu_quits() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    assert_eq!(apply_command(&mut s, Command::Pause, 0, &mut rng), Flow::Quit);
}

#[test]
fn quit_works_everywhere() {
    let mut rng = seeded_rng();
    for status in [
        GameStatus::Menu,
        GameStatus::Help,
        GameStatus::Playing,
        GameStatus::Paused,
        GameStatus::GameOver,
    ] {
        let mut s = make_state();
        s.status = status;
        assert_eq!(apply_command(&mut s, Command::Quit, 0, &mut rng), Flow::Quit);
    }
}

#[test]
fn help_returns_to_menu() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::Help, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Help);
    apply_command(&mut s, Command::Help, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Menu);
}

#[test]
fn help_from_pause_returns_to_pause() {
    let mut s = playing();
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::Pause, 0, &mut rng);
    apply_command(&mut s, Command::Help, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Help);
    // Confirm means nothing on the help screen.
    apply_command(&mut s, Command::Confirm, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Help);
    apply_command(&mut s, Command::Pause, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);
}

#[test]
fn help_is_ignored_while_playing() {
    let mut s = playing();
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::Help, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── Playing & paused ──────────────────────────────────────────────────────────

#[test]
fn pause_toggles() {
    let mut s = playing();
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::Pause, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Paused);
    apply_command(&mut s, Command::Pause, 0, &mut rng);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn paused_world_is_frozen() {
    let mut s = playing();
    let mut rng = seeded_rng();
    s.status = GameStatus::Paused;
    s.player.thrust = 2.0;
    let before = s.player.pos;
    let report = advance(&mut s, &Controls::default(), 1000, &mut rng);
    assert!(!report.game_over);
    assert_eq!(s.player.pos, before);
    assert!(s.bullets.is_empty());
}

#[test]
fn playing_advances_the_world() {
    let mut s = playing();
    let mut rng = seeded_rng();
    s.player.thrust = 2.0;
    let before = s.player.pos;
    advance(&mut s, &Controls::default(), 1000, &mut rng);
    assert_ne!(s.player.pos, before);
    assert!(!s.bullets.is_empty());
}

#[test]
fn toggle_autopilot_only_in_play() {
    let mut s = playing();
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::ToggleAutopilot, 0, &mut rng);
    assert!(s.autopilot);
    apply_command(&mut s, Command::ToggleAutopilot, 0, &mut rng);
    assert!(!s.autopilot);

    s.status = GameStatus::Paused;
    apply_command(&mut s, Command::ToggleAutopilot, 0, &mut rng);
    assert!(!s.autopilot);
}

#[test]
fn abilities_only_in_play() {
    let mut s = playing();
    let mut rng = seeded_rng();
    s.status = GameStatus::Paused;
    apply_command(&mut s, Command::TriggerBomb, 0, &mut rng);
    apply_command(&mut s, Command::TriggerLoop, 0, &mut rng);
    assert_eq!(s.player.bombs, PLAYER_START_BOMBS);
    assert!(!s.player.is_looping());

    s.status = GameStatus::Playing;
    apply_command(&mut s, Command::TriggerBomb, 0, &mut rng);
    apply_command(&mut s, Command::TriggerLoop, 0, &mut rng);
    assert_eq!(s.player.bombs, PLAYER_START_BOMBS - 1);
    assert!(s.player.is_looping());
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn confirm_waits_for_restart_delay() {
    let mut s = game_over_at(1000);
    let mut rng = seeded_rng();
    apply_command(&mut s, Command::Confirm, 1000 + RESTART_DELAY, &mut rng);
    assert_eq!(s.status, GameStatus::GameOver);
    apply_command(&mut s, Command::Confirm, 1001 + RESTART_DELAY, &mut rng);
    assert_eq!(s.status, GameStatus::Menu);
}

#[test]
fn game_over_returns_to_menu_on_its_own() {
    let mut s = game_over_at(1000);
    let mut rng = seeded_rng();
    advance(&mut s, &Controls::default(), 1000 + RESTART_DELAY, &mut rng);
    assert_eq!(s.status, GameStatus::GameOver);
    advance(&mut s, &Controls::default(), 1001 + RESTART_DELAY, &mut rng);
    assert_eq!(s.status, GameStatus::Menu);
}

#[test]
fn pause_is_ignored_on_game_over() {
    let mut s = game_over_at(0);
    let mut rng = seeded_rng();
    assert_eq!(apply_command(&mut s, Command::Pause, 10, &mut rng), Flow::Continue);
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn death_reports_game_over_exactly_once() {
    let mut s = playing();
    let mut rng = seeded_rng();
    s.player.hp = 1;
    let at = s.player.pos;
    s.enemies.push(Enemy::new(6, at, 90.0));

    let first = advance(&mut s, &Controls::default(), 200, &mut rng);
    assert!(first.game_over);
    let second = advance(&mut s, &Controls::default(), 233, &mut rng);
    assert!(!second.game_over);
    assert_eq!(s.game_over_at, Some(200));
}

#[test]
fn replay_after_game_over_keeps_high_score() {
    let mut s = game_over_at(0);
    let mut rng = seeded_rng();
    s.add_score(320);
    apply_command(&mut s, Command::Confirm, 5000, &mut rng);
    apply_command(&mut s, Command::Confirm, 5100, &mut rng);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 320);
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_exposes_hud() {
    let mut s = playing();
    s.player.shield = 2;
    s.player.weapon_tier = 3;
    s.add_score(40);
    s.stage = 2;
    s.boss = Some(Boss::with_hp(WORLD_WIDTH, 50, 100));

    let snap = snapshot(&s, 0);
    assert_eq!(snap.hud.score, 40);
    assert_eq!(snap.hud.high_score, 40);
    assert_eq!(snap.hud.stage, 2);
    assert_eq!(snap.hud.hp, 3);
    assert_eq!(snap.hud.shield, 2);
    assert_eq!(snap.hud.weapon_tier, 3);
    assert_eq!(snap.hud.bombs, PLAYER_START_BOMBS);
    assert!(snap.hud.loop_ready);
    assert!(!snap.hud.autopilot);
    assert_eq!(snap.hud.boss, Some((50, 100, 2)));
}

#[test]
fn snapshot_borrows_live_collections() {
    let mut s = playing();
    s.enemies.push(Enemy::new(1, Vec2::new(5.0, 5.0), 0.0));
    s.power_ups
        .push(PowerUp::new(Vec2::new(9.0, 9.0), Vec2::ZERO, PowerUpKind::Shield));
    let snap = snapshot(&s, 0);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.power_ups[0].kind, PowerUpKind::Shield);
    assert!(snap.boss.is_none());
}

#[test]
fn snapshot_transient_flags_expire() {
    let mut s = playing();
    s.bomb_flash_until = 300;
    s.stage_changed_at = Some(0);
    s.player.last_loop_at = Some(0);

    let early = snapshot(&s, 100);
    assert!(early.bomb_flash);
    assert!(early.stage_banner);
    assert!(!early.hud.loop_ready);

    let late = snapshot(&s, STAGE_TRANSITION_DURATION + LOOP_COOLDOWN);
    assert!(!late.bomb_flash);
    assert!(!late.stage_banner);
    assert!(late.hud.loop_ready);
}
