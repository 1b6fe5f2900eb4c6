//! Game settings and preferences
//!
//! Stored as JSON. Missing fields keep their defaults, so a settings file
//! only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Log the HUD line whenever it changes
    pub show_hud: bool,

    // === Gameplay ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_hud: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "muted": true, "tuning": { "spawn_cap": 5 } }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.tuning.spawn_cap, 5);
        assert_eq!(settings.tuning.jump_duration_ms, 1500);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let err = Settings::from_json(r#"{ "tuning": { "starting_lives": 0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/tentacle-dodge/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("tentacle-dodge-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.sfx_volume = 0.25;
        settings.tuning.spawn_interval_ms = 1000;
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
