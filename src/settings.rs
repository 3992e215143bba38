//! Game settings and preferences
//!
//! Read from a JSON file next to the binary. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::{GameError, GameResult};
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames (and simulation ticks) per second
    pub frame_rate: u32,
    /// Fixed RNG seed; a fresh one is drawn per session when unset
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Where the hall of fame is kept
    pub leaderboard_path: PathBuf,
    /// Fonts and sounds that must exist before the game starts
    pub assets: Vec<PathBuf>,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FPS,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            leaderboard_path: PathBuf::from("hall_of_fame.json"),
            assets: Vec::new(),

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or
    /// malformed
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(mut settings) => {
                log::info!("Loaded settings from {}", path.display());
                if let Err(err) = settings.tuning.validate() {
                    log::warn!("Ignoring tuning: {}", err);
                    settings.tuning = Tuning::default();
                }
                settings
            }
            Err(GameError::Persistence { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings: {}", err);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> GameResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| GameError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> GameResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| GameError::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("euclides.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("euclides.json");
        fs::write(&path, r#"{"seed": 7, "tuning": {"player_hull": 5}}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning.player_hull, 5);
        assert_eq!(settings.frame_rate, 60);
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("euclides.json");
        fs::write(
            &path,
            r#"{"seed": 3, "tuning": {"projectile_size_divisor": 0, "player_hull": 5}}"#,
        )
        .unwrap();
        let settings = Settings::load(&path);
        // The rest of the file still applies
        assert_eq!(settings.seed, Some(3));
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("euclides.json");
        let settings = Settings {
            muted: true,
            frame_rate: 30,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }
}
