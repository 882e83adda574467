//! Game settings and preferences
//!
//! Persisted separately from the best score: a JSON file on native, a
//! LocalStorage entry in the browser.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::sim::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Beeps on/off
    pub sound_on: bool,
    /// Volume (0.0 - 1.0)
    pub volume: f32,

    // === Visual Effects ===
    /// Particle bursts on hits and pickups
    pub particles: bool,

    // === Play ===
    /// Let the demo AI drive the paddle
    pub autopilot: bool,
    /// Fixed RNG seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            volume: 0.8,
            particles: true,
            autopilot: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if self.particles { MAX_PARTICLES } else { 0 }
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brickfall_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, defaulting when missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(StoreError::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "sound_on": false, "seed": 7 }"#)
            .expect("valid settings");
        assert!(!settings.sound_on);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.particles);
        assert_eq!(settings.volume, 0.8);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn test_particles_toggle() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir().join(format!("brickfall-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("settings.json");

        let settings = Settings {
            autopilot: true,
            ..Settings::default()
        };
        settings.save_to(&path).expect("save");
        assert_eq!(Settings::load_from(&path), settings);

        assert_eq!(Settings::load_from(&dir.join("missing.json")), Settings::default());
        std::fs::remove_dir_all(&dir).ok();
    }
}
