//! Game settings and preferences
//!
//! Read from a JSON file in the user's config directory. Only ever read:
//! the game writes nothing back to disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Direction;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "SNOOPY_SETTINGS";

/// Errors reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-to-direction table used during play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

impl Default for KeyBindings {
    /// Standard ZQSD layout: z up, s down, q left, d right
    ///
    /// Each key sits where its arrow would on an AZERTY keyboard.
    fn default() -> Self {
        Self {
            up: 'z',
            down: 's',
            left: 'q',
            right: 'd',
        }
    }
}

impl KeyBindings {
    /// Direction bound to `key` (ASCII case-insensitive)
    pub fn intent(&self, key: char) -> Option<Direction> {
        let key = key.to_ascii_lowercase();
        [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ]
        .into_iter()
        .find(|(bound, _)| bound.to_ascii_lowercase() == key)
        .map(|(_, dir)| dir)
    }

    /// Direction for one line of terminal input
    ///
    /// Arrow-key escape sequences always work; otherwise the first character
    /// is looked up in the table. Anything else is "no intent".
    pub fn intent_for_line(&self, line: &str) -> Option<Direction> {
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            "\x1b[A" => Some(Direction::Up),
            "\x1b[B" => Some(Direction::Down),
            "\x1b[D" => Some(Direction::Left),
            "\x1b[C" => Some(Direction::Right),
            _ => line.chars().next().and_then(|key| self.intent(key)),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Movement keys
    pub keys: KeyBindings,
    /// Level file for "new game"; the built-in level when unset
    pub default_level: Option<PathBuf>,
    /// Show the time/score/lives line under the grid
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            default_level: None,
            show_hud: true,
        }
    }
}

impl Settings {
    /// Settings file location: `$SNOOPY_SETTINGS`, else the platform config dir
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("snoopy-revenge").join("settings.json"))
    }

    /// Read settings from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults when missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::info!("No config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.intent('z'), Some(Direction::Up));
        assert_eq!(keys.intent('s'), Some(Direction::Down));
        assert_eq!(keys.intent('q'), Some(Direction::Left));
        assert_eq!(keys.intent('D'), Some(Direction::Right));
        assert_eq!(keys.intent('x'), None);
    }

    #[test]
    fn test_intent_for_line() {
        let keys = KeyBindings::default();
        assert_eq!(keys.intent_for_line("z\n"), Some(Direction::Up));
        assert_eq!(keys.intent_for_line("dq\n"), Some(Direction::Right));
        assert_eq!(keys.intent_for_line("\x1b[C\n"), Some(Direction::Right));
        assert_eq!(keys.intent_for_line("\x1b[A"), Some(Direction::Up));
        assert_eq!(keys.intent_for_line("\n"), None);
        assert_eq!(keys.intent_for_line("?\n"), None);
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"keys": {{"up": "w", "left": "a"}}, "show_hud": false}}"#).unwrap();
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.keys.intent('w'), Some(Direction::Up));
        assert_eq!(settings.keys.intent('a'), Some(Direction::Left));
        assert_eq!(settings.keys.intent('s'), Some(Direction::Down));
        assert!(!settings.show_hud);
        assert_eq!(settings.default_level, None);
    }

    #[test]
    fn test_invalid_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(SettingsError::Json(_))
        ));
    }
}
