//! Player settings
//!
//! Read once at startup from an optional TOML file.  Gameplay tuning lives
//! in `compute` as constants; this file only covers the environment the
//! game runs in.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings file name under `$HOME`.
pub const SETTINGS_FILE_NAME: &str = ".catch_the_object.toml";
pub const LOG_FILE_NAME: &str = ".catch_the_object.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the high score lives (defaults to `$HOME/.catch_the_object_score`)
    pub high_score_file: Option<PathBuf>,
    /// Log destination (defaults to `$HOME/.catch_the_object.log`)
    pub log_file: Option<PathBuf>,
    /// Ring the terminal bell on explosions
    pub sound: bool,
    /// Target frame rate
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_file: None,
            log_file: None,
            sound: true,
            fps: 30,
        }
    }
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

pub fn default_settings_path() -> PathBuf {
    home_dir().join(SETTINGS_FILE_NAME)
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load from `path`.  A missing file gives the defaults; a broken one
    /// gives the defaults plus a warning.
    pub fn load(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        };
        match Self::from_toml_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(crate::persistence::default_path)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| home_dir().join(LOG_FILE_NAME))
    }

    /// Frame duration, never faster than 1 ms.
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.max(1)).min(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = Settings::from_toml_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.fps, 30);
        assert!(s.sound);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let s = Settings::from_toml_str("sound = false\nhigh_score_file = \"/tmp/hs.txt\"\n").unwrap();
        assert!(!s.sound);
        assert_eq!(s.high_score_path(), PathBuf::from("/tmp/hs.txt"));
        assert_eq!(s.fps, 30);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(Settings::from_toml_str("fps = \"fast\"").is_err());
    }

    #[test]
    fn frame_duration_at_30_fps() {
        assert_eq!(Settings::default().frame_duration().as_millis(), 33);
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let path = std::env::temp_dir().join(format!(
            "catch_the_object_settings_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "fps = \"fast\"\n").unwrap();
        let s = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let s = Settings::load(Path::new("/definitely/not/here/settings.toml"));
        assert_eq!(s, Settings::default());
    }
}
