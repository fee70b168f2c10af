use std::path::PathBuf;

use crate::game::{GameStatus, Player};

/// Errors that can occur when building a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {width}x{height}: width and height must be >= 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("board dimensions {width}x{height} are too large")]
    TooLarge { width: usize, height: usize },
}

/// Errors returned by [`Engine::play`](crate::game::Engine::play) and
/// [`Engine::rotate`](crate::game::Engine::rotate).
///
/// `InvalidColumn` and `ColumnFull` mean the caller should ask for another
/// move. `RotationsDisabled` and `NoRotationsLeft` mean a rotation is not
/// available and the caller should drop a token instead. `GameOver` means the
/// game already reached a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (1-{width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game is over: {0}")]
    GameOver(GameStatus),

    #[error("rotations are disabled in this game")]
    RotationsDisabled,

    #[error("{} has no rotations left", .0.name())]
    NoRotationsLeft(Player),
}

impl MoveError {
    /// Whether the error comes from the game being finished rather than from
    /// the move itself.
    pub fn is_game_over(&self) -> bool {
        matches!(self, MoveError::GameOver(_))
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
