use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_HEIGHT, DEFAULT_ROTATIONS_PER_PLAYER, DEFAULT_WIDTH};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
}

/// Board a new game starts on, and the rotation rule for that game.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Whether players may rotate the board at all.
    pub rotations_enabled: bool,
    /// Rotations each player may play in one game.
    pub rotations_per_player: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            rotations_enabled: true,
            rotations_per_player: DEFAULT_ROTATIONS_PER_PLAYER,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 {
            return Err(ConfigError::Validation("board.width must be >= 1".into()));
        }
        if self.board.height == 0 {
            return Err(ConfigError::Validation("board.height must be >= 1".into()));
        }
        if self.board.rotations_enabled && self.board.rotations_per_player == 0 {
            return Err(ConfigError::Validation(
                "board.rotations_per_player must be >= 1 when rotations are enabled".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
