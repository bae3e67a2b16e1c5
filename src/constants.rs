//! Tuning constants. Times are milliseconds, distances are world units,
//! angles are degrees unless the name says otherwise.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 416.0;
pub const WORLD_HEIGHT: f32 = 312.0;
pub const FPS: u32 = 30;

// ── Player ────────────────────────────────────────────────────────────────────

pub const ROTATION_SPEED: f32 = 4.5;
pub const MAX_THRUST: f32 = 4.0;
pub const THRUST_ACCEL: f32 = 0.2;
/// Passive thrust decay per tick while flying manually.
pub const THRUST_DECAY: f32 = THRUST_ACCEL / 4.0;
pub const BULLET_SPEED: f32 = 7.0;
pub const SHOOT_DELAY: u64 = 150;
/// Perpendicular offset of the twin barrels at weapon tier 2.
pub const TWIN_BARREL_OFFSET: f32 = 5.0;
pub const SPREAD_ANGLE: f32 = 20.0;
pub const MAX_WEAPON_TIER: u8 = 3;

pub const PLAYER_START_ANGLE: f32 = -90.0;
pub const PLAYER_MAX_HP: i32 = 3;
pub const PLAYER_MAX_SHIELD: i32 = 3;
pub const PLAYER_START_BOMBS: u32 = 2;
pub const PLAYER_MAX_BOMBS: u32 = 5;
pub const HIT_INVINCIBILITY: u64 = 1500;

// ── Special abilities ─────────────────────────────────────────────────────────

pub const LOOP_DURATION: u64 = 800;
pub const LOOP_COOLDOWN: u64 = 3000;
pub const LOOP_RADIUS: f32 = 40.0;
pub const BOMB_INVINCIBILITY: u64 = 2000;
pub const BOMB_FLASH_DURATION: u64 = 300;
pub const BOMB_BOSS_DAMAGE: i32 = 50;
pub const BOMB_SHAKE_DURATION: u64 = 400;

// ── Autopilot ─────────────────────────────────────────────────────────────────

pub const EMERGENCY_DODGE_RADIUS: f32 = 50.0;
pub const PERCEPTION_RADIUS: f32 = 150.0;
pub const NEARBY_ENEMY_RADIUS: f32 = 100.0;
pub const NEARBY_BULLET_RADIUS: f32 = 80.0;
pub const PREFERRED_TARGET_RADIUS: f32 = 200.0;
pub const ENEMY_STANDOFF: f32 = 110.0;
pub const BOSS_STANDOFF: f32 = 150.0;
pub const STANDOFF_TOLERANCE: f32 = 30.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_RATE: u32 = 50;
pub const MIN_ENEMY_SPAWN_RATE: u32 = 20;
pub const ENEMY_BULLET_SPEED: f32 = 3.0;
pub const ENEMY_ROTATION_SPEED: f32 = 2.5;
/// Enemies fire with odds `1 / (ENEMY_FIRE_ODDS / tier + 1)` per tick.
pub const ENEMY_FIRE_ODDS: u32 = 70;
pub const HOMING_SPEED: f32 = 2.5;
pub const HOMING_TIER: u8 = 4;
pub const HOMING_LIFETIME: u64 = 15_000;
pub const SPAWN_EDGE_OFFSET: f32 = 20.0;

pub const TIER_SPAWN_PROBS: [f64; 6] = [0.40, 0.30, 0.15, 0.08, 0.05, 0.02];
pub const LOW_TIER_PROBS: [f64; 3] = [0.47, 0.35, 0.18];
/// Highest tier that counts as a low-tier kill.
pub const LOW_TIER_MAX: u8 = 3;
pub const TIER_SHIFT_FRACTION: f64 = 0.1;
pub const MAX_TIER_SHIFTS: u32 = 3;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_SPAWN_SCORE: u32 = 500;
pub const BOSS_HP: i32 = 250;
pub const BOSS_SPEED: f32 = 1.5;
pub const BOSS_SIZE: f32 = 40.0;
pub const BOSS_SPAWN_Y: f32 = 50.0;
pub const BOSS_SLOW_ATTACK_TICKS: u32 = 60;
pub const BOSS_FAST_ATTACK_TICKS: u32 = 30;
pub const BOSS_SPREAD_ANGLE: f32 = 15.0;
pub const BOSS_BARRAGE_BULLETS: usize = 8;
pub const BOSS_SWEEP_RAD_PER_TICK: f32 = 0.1;
pub const BOSS_POWER_UP_DROPS: usize = 5;

// ── Asteroids ─────────────────────────────────────────────────────────────────

pub const ASTEROID_SPAWN_MARGIN: f32 = 20.0;
pub const ASTEROID_SPAWN_RATE: u32 = 100;
pub const MIN_ASTEROID_SPAWN_RATE: u32 = 30;
pub const ASTEROID_MIN_RADIUS: u32 = 5;
pub const ASTEROID_MAX_RADIUS: u32 = 15;
pub const ASTEROID_MIN_SPEED: f32 = 0.5;
pub const ASTEROID_MAX_SPEED: f32 = 2.0;

// ── Collision radii ───────────────────────────────────────────────────────────

pub const BULLET_VS_ENEMY_BULLET: f32 = 4.0;
pub const BULLET_VS_ENEMY: f32 = 10.0;
pub const ENEMY_VS_PLAYER: f32 = 10.0;
pub const ENEMY_BULLET_VS_PLAYER: f32 = 5.0;
pub const POWER_UP_PICKUP: f32 = 10.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const ENEMY_POINTS_PER_TIER: u32 = 10;
pub const BOMB_POINTS_PER_TIER: u32 = 5;
pub const BOSS_POINTS: u32 = 500;
pub const STAGE_SCORE_INTERVAL: u32 = 200;
pub const TIME_SCORE_INTERVAL: u64 = 10_000;
pub const TIME_SCORE_AMOUNT: u32 = 1;
pub const ASTEROID_DROP_CHANCE: f64 = 0.12;
pub const ENEMY_DROP_BASE: f64 = 0.15;
pub const ENEMY_DROP_PER_TIER: f64 = 0.05;

// ── Effects & flow ────────────────────────────────────────────────────────────

pub const PARTICLE_LIFETIME: u32 = 30;
pub const PARTICLE_DAMPING: f32 = 0.95;
pub const EXPLOSION_PARTICLES: f32 = 20.0;
pub const SCREEN_SHAKE_DURATION: u64 = 200;
pub const HIT_SHAKE_DURATION: u64 = 100;
pub const SCREEN_SHAKE_INTENSITY: i32 = 3;
pub const STAGE_TRANSITION_DURATION: u64 = 2000;
pub const RESTART_DELAY: u64 = 3000;
