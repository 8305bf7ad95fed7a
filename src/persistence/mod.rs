//! Level library persistence
//!
//! - Saved levels as a JSON array in LocalStorage
//! - Built-in samples when nothing valid is stored
//! - Pretty JSON export/import of single levels

pub mod storage;

use thiserror::Error;

use crate::sim::{Level, sample_levels};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no level with id {0:?}")]
    UnknownId(String),
}

/// The set of playable levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLibrary {
    levels: Vec<Level>,
}

impl Default for LevelLibrary {
    fn default() -> Self {
        Self {
            levels: sample_levels(),
        }
    }
}

impl LevelLibrary {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "cd_levels_v1";

    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Parse a stored library; an empty list falls back to the samples
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        if levels.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { levels })
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(&self.levels)?)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn get(&self, id: &str) -> Result<&Level, LevelError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| LevelError::UnknownId(id.to_string()))
    }

    /// Replace the level with the same id, or append it
    pub fn upsert(&mut self, level: Level) {
        match self.levels.iter_mut().find(|l| l.id == level.id) {
            Some(existing) => *existing = level,
            None => self.levels.push(level),
        }
    }

    /// Load from LocalStorage, falling back to the samples
    pub fn load() -> Self {
        if let Some(json) = storage::get_item(Self::STORAGE_KEY) {
            match Self::from_json(&json) {
                Ok(library) => {
                    log::info!("Loaded {} levels", library.levels.len());
                    return library;
                }
                Err(e) => log::warn!("Ignoring stored levels: {}", e),
            }
        }
        log::info!("Using sample levels");
        Self::default()
    }

    pub fn save(&self) {
        match self.to_json() {
            Ok(json) => {
                if storage::set_item(Self::STORAGE_KEY, &json) {
                    log::info!("Levels saved ({} levels)", self.levels.len());
                }
            }
            Err(e) => log::error!("Could not serialize levels: {}", e),
        }
    }
}

/// Pretty JSON for downloading a single level
pub fn export_level(level: &Level) -> Result<String, LevelError> {
    Ok(serde_json::to_string_pretty(level)?)
}

pub fn import_level(json: &str) -> Result<Level, LevelError> {
    Ok(serde_json::from_str(json)?)
}

/// File name offered for an exported level
pub fn export_file_name(level: &Level) -> String {
    let name = if level.name.is_empty() { "level" } else { &level.name };
    format!("{name}.json")
}
