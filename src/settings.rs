use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Settings ────────────────────────────────────────────────────────────────

/// User-facing knobs persisted between runs as a small JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sprite scale factor applied to both axes.
    pub scale: f32,
    /// Whether the character wanders on its own while idle.
    pub idle_movement: bool,
    /// Ambient distraction level, `0..=MAX_DISTRACTION_LEVEL`.
    pub distraction_level: u32,
    /// Name of the character to load at startup.
    pub character: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            idle_movement: true,
            distraction_level: 0,
            character: "mate".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed. A broken file must never take the app down.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), %err, "settings unreadable, using defaults");
                }
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
