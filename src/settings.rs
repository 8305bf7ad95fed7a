//! Player preferences
//!
//! Persisted separately from levels and high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::storage;
use crate::skins::{self, Skin};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }
}

fn default_skin() -> String {
    skins::SKINS[0].id.to_string()
}

fn default_true() -> bool {
    true
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_skin")]
    pub skin: String,
    #[serde(default)]
    pub quality: QualityPreset,
    /// Jump/crash particle bursts
    #[serde(default = "default_true")]
    pub particles: bool,
    #[serde(default = "default_true")]
    pub music: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skin: default_skin(),
            quality: QualityPreset::Medium,
            particles: true,
            music: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "cd_settings_v1";

    pub fn skin(&self) -> &'static Skin {
        skins::skin_by_id(&self.skin)
    }

    pub fn select_skin(&mut self, id: &str) {
        self.skin = skins::skin_by_id(id).id.to_string();
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Select a quality preset by name; unknown names leave it unchanged
    pub fn set_quality(&mut self, name: &str) -> bool {
        match QualityPreset::parse(name) {
            Some(quality) => {
                self.quality = quality;
                log::info!("Quality set to {}", quality.as_str());
                true
            }
            None => false,
        }
    }

    /// Label for the quality button
    pub fn quality_label(&self) -> String {
        format!("Quality: {}", self.quality.as_str())
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music = !self.music;
        self.music
    }

    /// Label for the music toggle button
    pub fn music_label(&self) -> &'static str {
        if self.music { "Music: On" } else { "Music: Off" }
    }

    pub fn load() -> Self {
        if let Some(json) = storage::get_item(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("Loaded settings from LocalStorage");
                return settings;
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
