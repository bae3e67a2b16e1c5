use std::fs;
use std::path::PathBuf;

use retro_shooter::config::GameConfig;
use retro_shooter::constants::{FPS, WORLD_HEIGHT, WORLD_WIDTH};
use retro_shooter::error::GameError;

#[test]
fn empty_file_gives_defaults() {
    let config = GameConfig::from_toml("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.width, WORLD_WIDTH);
    assert_eq!(config.height, WORLD_HEIGHT);
    assert_eq!(config.fps, FPS);
    assert_eq!(config.high_score_path, PathBuf::from("highscore.json"));
    assert!(!config.autopilot);
}

#[test]
fn partial_file_overrides_only_given_keys() {
    let config = GameConfig::from_toml(
        r#"
        width = 640.0
        autopilot = true
        high_score_path = "/tmp/best.json"
        "#,
    )
    .unwrap();
    assert_eq!(config.width, 640.0);
    assert_eq!(config.height, WORLD_HEIGHT);
    assert!(config.autopilot);
    assert_eq!(config.high_score_path, PathBuf::from("/tmp/best.json"));
}

#[test]
fn wrong_type_is_rejected() {
    assert!(GameConfig::from_toml("fps = \"fast\"").is_err());
}

#[test]
fn frame_time_follows_fps() {
    assert_eq!(GameConfig::default().frame_millis(), 33);
    let config = GameConfig {
        fps: 0,
        ..GameConfig::default()
    };
    assert_eq!(config.frame_millis(), 1000);
}

#[test]
fn load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    fs::write(&path, "fps = 60\n").unwrap();
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.fps, 60);
    assert_eq!(config.frame_millis(), 16);
}

#[test]
fn load_malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    fs::write(&path, "width = [").unwrap();
    match GameConfig::load(&path) {
        Err(GameError::ConfigParse { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}
