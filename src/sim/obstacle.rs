//! Track obstacles and their per-kind hit tests

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::color::Rgb;
use crate::consts::GAP_EPSILON;

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Solid rectangle standing on the ground
    Block,
    /// Row of spikes; hit-tested as its bounding rectangle
    Spike,
    /// Hole in the ground, deadly only at ground level
    Gap,
}

fn default_width() -> f32 {
    120.0
}

fn default_height() -> f32 {
    80.0
}

/// An obstacle as authored in a level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
    /// Offset from the track origin
    pub x: f32,
    #[serde(rename = "w", default = "default_width")]
    pub width: f32,
    /// Ignored for gaps
    #[serde(rename = "h", default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub color: Rgb,
}

impl ObstacleSpec {
    pub fn new(kind: ObstacleKind, x: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            width,
            height,
            color: Rgb::default(),
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Right edge in track space
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Rectangle standing on `ground_y` (blocks and spikes)
    pub fn rect(&self, ground_y: f32) -> Aabb {
        Aabb::new(self.x, ground_y - self.height, self.width, self.height)
    }

    /// Hit test against an actor box in track space
    pub fn collides(&self, actor: &Aabb, ground_y: f32) -> bool {
        if self.width <= 0.0 {
            return false;
        }
        match self.kind {
            ObstacleKind::Block | ObstacleKind::Spike => actor.overlaps(&self.rect(ground_y)),
            ObstacleKind::Gap => {
                actor.overlaps_x(self.x, self.right())
                    && actor.bottom() >= ground_y - GAP_EPSILON
            }
        }
    }
}

/// An obstacle live in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub spec: ObstacleSpec,
    /// Advisory: the actor has moved beyond this obstacle
    pub passed: bool,
}

impl Obstacle {
    pub fn spawn(spec: &ObstacleSpec) -> Self {
        if cfg!(debug_assertions) && spec.width <= 0.0 {
            log::warn!(
                "{:?} at x={} has non-positive width {}",
                spec.kind,
                spec.x,
                spec.width
            );
        }
        Self {
            spec: spec.clone(),
            passed: false,
        }
    }

    #[inline]
    pub fn collides(&self, actor: &Aabb, ground_y: f32) -> bool {
        self.spec.collides(actor, ground_y)
    }
}
