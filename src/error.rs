//! Crate error type.
//!
//! Only the I/O edges (config file, high-score file) can fail. Nothing in
//! the simulation itself returns an error: death and game over are game
//! state, not failures.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file exists but is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The high-score record could not be serialized.
    HighScoreEncode(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io { path, source } => {
                write!(f, "i/o error on '{}': {}", path.display(), source)
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "invalid config '{}': {}", path.display(), source)
            }
            GameError::HighScoreEncode(source) => {
                write!(f, "could not encode high score: {}", source)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            GameError::HighScoreEncode(source) => Some(source),
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
