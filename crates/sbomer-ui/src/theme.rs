//! Persisted color theme preference.
//!
//! Stored as one key in a small JSON preferences file. Unknown stored values
//! are ignored and the system default applies.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DashboardConfig;
use crate::error::ThemeError;

/// Preference key holding the theme.
pub const THEME_KEY: &str = "sbomer-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    White,
    G10,
    G90,
    G100,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::White, Theme::G10, Theme::G90, Theme::G100];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::White => "white",
            Theme::G10 => "g10",
            Theme::G90 => "g90",
            Theme::G100 => "g100",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::White => "White (Light)",
            Theme::G10 => "Gray 10 (Light)",
            Theme::G90 => "Gray 90 (Dark)",
            Theme::G100 => "Gray 100 (Darkest)",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::G90 | Theme::G100)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s.trim())
            .ok_or_else(|| ThemeError::UnknownTheme(s.to_string()))
    }
}

/// Picks the default from a `COLORFGBG` value (`"fg;bg"` or `"fg;x;bg"`).
///
/// Background colors 0-6 and 8 are dark in the standard 16-color palette.
pub fn default_for_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(bg) if bg <= 6 || bg == 8 => Theme::G100,
        _ => Theme::White,
    }
}

/// Default theme when nothing is stored: dark when the terminal is dark.
pub fn system_default() -> Theme {
    default_for_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, ThemeError> {
        config
            .preferences_file()
            .map(Self::new)
            .ok_or(ThemeError::NoPreferencesPath)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_preferences(&self) -> Result<Map<String, Value>, ThemeError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ThemeError::ReadFile {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => {
                log::warn!(
                    "Preferences file {} is not a JSON object, ignoring it",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    /// The stored theme, if a valid one is stored.
    pub fn get(&self) -> Result<Option<Theme>, ThemeError> {
        let preferences = self.read_preferences()?;
        let stored = match preferences.get(THEME_KEY).and_then(Value::as_str) {
            Some(stored) => stored,
            None => return Ok(None),
        };

        match stored.parse::<Theme>() {
            Ok(theme) => Ok(Some(theme)),
            Err(_) => {
                log::debug!("Ignoring unknown stored theme '{}'", stored);
                Ok(None)
            }
        }
    }

    /// The stored theme, or the system default.
    pub fn current(&self) -> Result<Theme, ThemeError> {
        Ok(self.get()?.unwrap_or_else(system_default))
    }

    /// Stores `theme`, keeping any other preferences in the file.
    pub fn set(&self, theme: Theme) -> Result<(), ThemeError> {
        let mut preferences = self.read_preferences()?;
        preferences.insert(THEME_KEY.to_string(), Value::String(theme.to_string()));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ThemeError::WriteFile {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(preferences))?;
        fs::write(&self.path, content).map_err(|e| ThemeError::WriteFile {
            path: self.path.clone(),
            source: e,
        })?;

        log::info!("Theme set to {}", theme);
        Ok(())
    }
}
