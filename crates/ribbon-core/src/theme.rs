//! Theme preference
//!
//! Stored in its own slot next to the bookmarks, as plain `light` or `dark`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{SlotStorage, StorageResult, THEME_SLOT};

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}'. Use 'light' or 'dark'.", other)),
        }
    }
}

/// Read the saved theme; anything missing or unrecognized means `Light`
pub fn load_theme(storage: &impl SlotStorage) -> Theme {
    match storage.get(THEME_SLOT) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!("ignoring saved theme: {}", e);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("could not read saved theme: {}", e);
            Theme::default()
        }
    }
}

/// Persist the theme preference
pub fn save_theme(storage: &mut impl SlotStorage, theme: Theme) -> StorageResult<()> {
    storage.set(THEME_SLOT, theme.as_str())
}
