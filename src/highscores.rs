//! Best distance
//!
//! One value persisted to LocalStorage, stored as whole units (floored).

use serde::{Deserialize, Serialize};

use crate::persistence::storage;
use crate::sim::RunEvent;

/// The farthest any run has reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    best: u32,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "cd_highscore_v1";

    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `distance` if it beats the stored best; returns whether it did
    pub fn record(&mut self, distance: f32) -> bool {
        let distance = distance.max(0.0).floor() as u32;
        if distance <= self.best {
            return false;
        }
        self.best = distance;
        true
    }

    /// Score a run event; only crashes and completions carry a final distance
    pub fn record_event(&mut self, event: &RunEvent) -> bool {
        match event {
            RunEvent::Crashed { distance } | RunEvent::Completed { distance } => {
                self.record(*distance)
            }
            RunEvent::Started { .. } | RunEvent::Jumped => false,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// HUD label
    pub fn hud_label(&self) -> String {
        format!("High: {}", self.best)
    }

    pub fn load() -> Self {
        // Older saves may hold a fractional number
        let stored = storage::get_item(Self::STORAGE_KEY)
            .and_then(|json| serde_json::from_str::<f64>(&json).ok());
        match stored {
            Some(best) => {
                let scores = Self {
                    best: best.max(0.0).floor() as u32,
                };
                log::info!("Loaded high score {}", scores.best);
                scores
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage::set_item(Self::STORAGE_KEY, &json) {
                log::info!("High score saved ({})", self.best);
            }
        }
    }

    /// Clear the best, in memory and in storage
    pub fn reset(&mut self) {
        self.best = 0;
        storage::remove_item(Self::STORAGE_KEY);
        log::info!("High score reset");
    }
}
