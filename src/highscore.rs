//! High-score persistence: a single `{"high_score": n}` JSON record.
//!
//! Loading never fails from the caller's point of view. A missing or
//! corrupt file simply means no score has been recorded yet.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u32,
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), "no high score on disk: {err}");
                return 0;
            }
        };
        match serde_json::from_str::<HighScoreRecord>(&text) {
            Ok(record) => record.high_score,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "ignoring corrupt high score: {err}");
                0
            }
        }
    }

    pub fn save(&self, high_score: u32) -> GameResult<()> {
        let json = serde_json::to_string(&HighScoreRecord { high_score })
            .map_err(GameError::HighScoreEncode)?;
        fs::write(&self.path, json).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
