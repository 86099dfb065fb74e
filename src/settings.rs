//! Game settings and preferences
//!
//! Persisted under their own key in the local key-value store, separately
//! from player data.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BALL_SPEED;
use crate::store::KvStore;

const SETTINGS_KEY: &str = "settings";

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Ball speed for this preset (pixels per tick)
    pub fn ball_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 4.0,
            Difficulty::Medium => 6.0,
            Difficulty::Hard => 8.0,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Stored alongside the preset so the game screen reads one value
    pub ball_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            ball_speed: DEFAULT_BALL_SPEED,
        }
    }
}

impl Settings {
    /// Settings for a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ball_speed: difficulty.ball_speed(),
        }
    }

    /// Switch presets, keeping the derived speed in sync
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.ball_speed = difficulty.ball_speed();
    }

    /// Load from storage, falling back to defaults on missing or bad data
    pub fn load<K: KvStore>(kv: &K) -> Self {
        match kv.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("settings loaded");
                    settings
                }
                Err(err) => {
                    log::warn!("settings data is corrupt, using defaults: {err}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("no saved settings, using defaults");
                Self::default()
            }
            Err(err) => {
                log::warn!("failed to read settings, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Write through to storage; failures are logged and swallowed
    pub fn save<K: KvStore>(&self, kv: &mut K) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(err) = kv.set(SETTINGS_KEY, &json) {
                    log::warn!("failed to save settings: {err}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(err) => log::warn!("failed to serialize settings: {err}"),
        }
    }
}
