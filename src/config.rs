// Tunable timings and volumes, read from `assets/config.ron` when present.

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH: &str = "assets/config.ron";

/// Inserts `GameConfig`. Add after `DefaultPlugins` so load problems get logged.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_config());
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub answer_cooldown_ms: u64,
    pub inter_level_delay_ms: u64,
    pub victory_countdown_secs: u32,
    pub victory_sting_delay_ms: u64,
    pub ending_duration_secs: f32,
    pub music_volume: f32,
    pub click_volume: f32,
    pub effect_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            answer_cooldown_ms: 500,
            inter_level_delay_ms: 3000,
            victory_countdown_secs: 40,
            victory_sting_delay_ms: 300,
            ending_duration_secs: 15.0,
            music_volume: 0.3,
            click_volume: 0.4,
            effect_volume: 0.6,
        }
    }
}

impl GameConfig {
    pub fn answer_cooldown(&self) -> Duration {
        Duration::from_millis(self.answer_cooldown_ms)
    }

    pub fn inter_level_delay(&self) -> Duration {
        Duration::from_millis(self.inter_level_delay_ms)
    }

    pub fn victory_sting_delay(&self) -> Duration {
        Duration::from_millis(self.victory_sting_delay_ms)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub fn parse_config(contents: &str) -> Result<GameConfig, ConfigError> {
    Ok(ron::from_str(contents)?)
}

/// Returns `Ok(None)` when the file simply isn't there.
pub fn read_config(path: &Path) -> Result<Option<GameConfig>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    parse_config(&contents).map(Some)
}

/// Never fails: any problem falls back to the defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> GameConfig {
    match read_config(Path::new(CONFIG_PATH)) {
        Ok(Some(config)) => {
            info!("Loaded settings from {CONFIG_PATH}");
            config
        }
        Ok(None) => GameConfig::default(),
        Err(e) => {
            warn!("{e}, using default settings");
            GameConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> GameConfig {
    GameConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_latest_timings() {
        let config = GameConfig::default();
        assert_eq!(config.answer_cooldown(), Duration::from_millis(500));
        assert_eq!(config.inter_level_delay(), Duration::from_secs(3));
        assert_eq!(config.victory_countdown_secs, 40);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse_config("(victory_countdown_secs: 30, music_volume: 0.5)").unwrap();
        assert_eq!(config.victory_countdown_secs, 30);
        assert_eq!(config.music_volume, 0.5);
        assert_eq!(config.answer_cooldown_ms, 500);
        assert_eq!(config.inter_level_delay_ms, 3000);
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let config = parse_config(include_str!("../assets/config.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = parse_config("(victory_countdown_secs: \"soon\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let result = read_config(Path::new("definitely/not/here.ron")).unwrap();
        assert!(result.is_none());
    }
}
