//! Game configuration
//!
//! Every tunable constant of the simulation lives here. Defaults reproduce
//! the shipped game; a RON file can override any subset of fields.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Simulation constants. Units are world units and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // World
    pub world_width: f64,
    pub world_height: f64,
    pub ticks_per_second: u32,

    // Physics (per tick)
    pub gravity: f64,
    pub friction: f64,
    pub player_speed: f64,
    pub jump_power: f64,
    pub dash_power: f64,
    pub dash_cooldown_ticks: i32,

    // Sizes
    pub player_width: f64,
    pub player_height: f64,
    pub collectible_size: f64,
    pub goal_width: f64,
    pub goal_height: f64,
    pub ground_height: f64,

    // Rules
    pub collectible_score: u32,
    pub base_time_limit: f64,
    pub time_per_level: f64,
    pub max_levels: u32,
    /// End the run as soon as the player dies instead of waiting for the timer
    pub end_run_on_death: bool,

    // Random layout (levels past the authored ones)
    pub random_platform_count: usize,
    pub random_platform_width: f64,
    pub random_platform_height: f64,
    pub random_platform_spacing: f64,
    pub random_collectible_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 1000.0,
            world_height: 600.0,
            ticks_per_second: 60,

            gravity: 0.6,
            friction: 0.85,
            player_speed: 5.0,
            jump_power: 12.0,
            dash_power: 15.0,
            dash_cooldown_ticks: 30,

            player_width: 30.0,
            player_height: 40.0,
            collectible_size: 15.0,
            goal_width: 80.0,
            goal_height: 40.0,
            ground_height: 40.0,

            collectible_score: 100,
            base_time_limit: 60.0,
            time_per_level: 5.0,
            max_levels: 3,
            end_run_on_death: false,

            random_platform_count: 10,
            random_platform_width: 120.0,
            random_platform_height: 30.0,
            random_platform_spacing: 80.0,
            random_collectible_count: 8,
        }
    }
}

impl GameConfig {
    /// Parse a config from RON text. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load a config file, falling back to defaults when it is absent or bad.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Seconds allowed for a level
    pub fn time_limit(&self, level_index: u32) -> f64 {
        self.base_time_limit + self.time_per_level * level_index as f64
    }

    /// Where a fresh player appears
    pub fn spawn_point(&self) -> (f64, f64) {
        (50.0, self.world_height - 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_time_limit() {
        let config = GameConfig::default();
        assert_eq!(config.time_limit(1), 65.0);
        assert_eq!(config.time_limit(3), 75.0);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = GameConfig::from_ron("(gravity: 0.5, max_levels: 5)").unwrap();
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.max_levels, 5);
        assert_eq!(config.jump_power, 12.0);
        assert_eq!(config.dash_cooldown_ticks, 30);
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let result = GameConfig::from_ron("(gravity: \"heavy\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();

        let missing = GameConfig::load_or_default(dir.path().join("missing.ron"));
        assert_eq!(missing, GameConfig::default());

        let bad = dir.path().join("bad.ron");
        std::fs::write(&bad, "not ron at all (").unwrap();
        assert_eq!(GameConfig::load_or_default(&bad), GameConfig::default());

        let good = dir.path().join("good.ron");
        std::fs::write(&good, "(friction: 0.9)").unwrap();
        assert_eq!(GameConfig::load_or_default(&good).friction, 0.9);
    }
}
