//! Game settings and difficulty tuning
//!
//! Every difficulty or mode change rebuilds the affected game from scratch;
//! nothing here is consulted mid-game except the cosmetic delays.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::puzzle::tictactoe::Mode as TicTacToeMode;
use crate::sim::snake::SnakeMode;

/// Difficulty levels shared by every game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Snake interval timer period
    pub fn snake_tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(60),
        }
    }

    /// Breakout ball speed per axis (pixels per tick)
    pub fn breakout_ball_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 4.0,
            Difficulty::Hard => 6.0,
        }
    }

    /// Breakout paddle width (pixels)
    pub fn breakout_paddle_width(&self) -> f32 {
        match self {
            Difficulty::Easy => 120.0,
            Difficulty::Medium => 100.0,
            Difficulty::Hard => 80.0,
        }
    }
}

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arcade settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty applied to whichever game is started next
    pub difficulty: Difficulty,

    // === Modes ===
    pub tictactoe_mode: TicTacToeMode,
    pub snake_mode: SnakeMode,
    /// Flow Free level index within the difficulty's level list
    pub flow_level: usize,

    /// Seed for the injected RNG (None = entropy)
    pub seed: Option<u64>,

    // === Cosmetic delays ===
    /// Artificial "thinking" pause before the Tic-Tac-Toe AI moves
    pub ai_think_delay_ms: u64,
    /// How long a mismatched Memory pair stays face-up
    pub mismatch_hide_delay_ms: u64,
    /// Pause between a 2048 slide and the new tile appearing
    pub tile_spawn_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,

            tictactoe_mode: TicTacToeMode::PlayerVsAi,
            snake_mode: SnakeMode::Single,
            flow_level: 0,

            seed: None,

            ai_think_delay_ms: 500,
            mismatch_hide_delay_ms: 1000,
            tile_spawn_delay_ms: 150,
        }
    }
}

impl Settings {
    /// Create settings for a difficulty (everything else default)
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn ai_think_delay(&self) -> Duration {
        Duration::from_millis(self.ai_think_delay_ms)
    }

    pub fn mismatch_hide_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_hide_delay_ms)
    }

    pub fn tile_spawn_delay(&self) -> Duration {
        Duration::from_millis(self.tile_spawn_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("normal"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_snake_interval_shrinks_with_difficulty() {
        assert!(Difficulty::Easy.snake_tick_interval() > Difficulty::Medium.snake_tick_interval());
        assert!(Difficulty::Medium.snake_tick_interval() > Difficulty::Hard.snake_tick_interval());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "Hard" }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.ai_think_delay_ms, 500);
        assert_eq!(settings.snake_mode, SnakeMode::Single);
        assert_eq!(settings.tile_spawn_delay(), Duration::from_millis(150));
        assert_eq!(settings.mismatch_hide_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::with_difficulty(Difficulty::Easy);
        settings.seed = Some(42);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/arcade-settings.json");
        assert_eq!(settings, Settings::default());
    }
}
