//! Level drafts authored on the editor timeline
//!
//! The timeline maps a click at fraction `p` of its width to track position
//! `p * length`. Every edit should be followed by restarting the preview on
//! the new draft.

use crate::color::Rgb;
use crate::sim::{Level, ObstacleKind, ObstacleSpec};

/// Nothing may be placed before this track position
pub const MIN_PLACE_X: f32 = 80.0;
/// Narrowest gap the editor will create
pub const MIN_GAP_WIDTH: f32 = 40.0;
/// Length of a brand-new draft
pub const NEW_LEVEL_LENGTH: f32 = 2200.0;

/// Current tool settings of the editor panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: ObstacleKind::Block,
            width: 120.0,
            height: 80.0,
            color: Rgb::CORAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelDraft {
    pub level: Level,
}

impl LevelDraft {
    /// Empty draft; `created_ms` makes the id unique
    pub fn new(created_ms: u64) -> Self {
        Self {
            level: Level::new(format!("custom-{created_ms}"), "New Level", NEW_LEVEL_LENGTH),
        }
    }

    /// Edit a copy of an existing level
    pub fn from_level(level: &Level) -> Self {
        Self {
            level: level.clone(),
        }
    }

    fn length(&self) -> f32 {
        self.level.length_or(NEW_LEVEL_LENGTH)
    }

    /// Track position under a timeline fraction
    pub fn position_at(&self, fraction: f32) -> f32 {
        fraction * self.length()
    }

    /// Place an obstacle with `brush` at timeline fraction `fraction`
    pub fn place(&mut self, fraction: f32, brush: &Brush) -> &ObstacleSpec {
        let x = self.position_at(fraction).round().max(MIN_PLACE_X);
        let width = match brush.kind {
            ObstacleKind::Gap => brush.width.max(MIN_GAP_WIDTH),
            ObstacleKind::Block | ObstacleKind::Spike => brush.width,
        };
        let spec = ObstacleSpec::new(brush.kind, x, width, brush.height).with_color(brush.color);
        self.level.obstacles.push(spec);
        &self.level.obstacles[self.level.obstacles.len() - 1]
    }

    /// Index of the first obstacle whose span contains timeline fraction `fraction`
    pub fn obstacle_at(&self, fraction: f32) -> Option<usize> {
        let pos = self.position_at(fraction);
        self.level
            .obstacles
            .iter()
            .position(|o| pos >= o.x && pos <= o.x + o.width.max(0.0))
    }

    /// Remove the obstacle under timeline fraction `fraction`
    pub fn remove_at(&mut self, fraction: f32) -> Option<ObstacleSpec> {
        let idx = self.obstacle_at(fraction)?;
        Some(self.level.obstacles.remove(idx))
    }

    /// Rename, keeping the old name when `name` is blank
    pub fn rename(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.level.name = name.to_string();
        }
    }

    /// Obstacle rectangles as percentages of the timeline width
    pub fn timeline_spans(&self) -> Vec<(f32, f32)> {
        let length = self.length();
        self.level
            .obstacles
            .iter()
            .map(|o| (o.x / length * 100.0, o.width / length * 100.0))
            .collect()
    }
}
