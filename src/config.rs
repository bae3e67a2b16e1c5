//! Runtime configuration loaded from a TOML file.
//!
//! Every field falls back to its compile-time default, so a config file only
//! needs the keys it wants to override:
//!
//! ```toml
//! width = 480
//! autopilot = true
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{FPS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
    /// Start every new game with the autopilot engaged.
    pub autopilot: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            fps: FPS,
            high_score_path: PathBuf::from("highscore.json"),
            log_path: PathBuf::from("retro_shooter.log"),
            autopilot: false,
        }
    }
}

impl GameConfig {
    /// Loads `path`, or returns the defaults when the file does not exist.
    pub fn load(path: &Path) -> GameResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GameError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Milliseconds per tick at the configured frame rate.
    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}
