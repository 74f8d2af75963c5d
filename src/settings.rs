//! Rig settings with persistence
//!
//! Settings are read from `~/.config/strider/settings.toml` unless a path is
//! given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use strider_core::TimeConfig;
use strider_game::{CameraConfig, MovementTuning};
use strider_physics::{CharacterControllerConfig, PhysicsConfig};

/// All rig settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementTuning,
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
    pub character: CharacterControllerConfig,
    pub time: TimeConfig,
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strider"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to
    /// defaults if the file is missing or unreadable
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let Some(path) = Self::settings_path() else {
                    warn!("Could not determine config directory");
                    return Self::default();
                };
                path
            }
        };

        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text; missing sections and fields take defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings = Settings::parse(
            r#"
            [movement]
            walk_speed = 90.0

            [camera]
            follow_distance = 150.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.movement.walk_speed, 90.0);
        assert_eq!(settings.movement.run_speed, 290.0);
        assert_eq!(settings.camera.follow_distance, 150.0);
        assert_eq!(settings.character.height, 64.0);
        assert_eq!(settings.time.fixed_timestep, 1.0 / 60.0);
    }

    #[test]
    fn test_serialized_settings_parse_back() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed = Settings::parse(&text).unwrap();
        assert_eq!(parsed.movement, MovementTuning::default());
        assert_eq!(parsed.camera, CameraConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/strider/settings.toml")));
        assert_eq!(settings.movement, MovementTuning::default());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Settings::parse("movement = 3").is_err());
    }
}
