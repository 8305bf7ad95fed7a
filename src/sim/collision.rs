//! Axis-aligned boxes and overlap tests
//!
//! Overlap is strict on both axes: boxes that only share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `min` is the top-left corner (y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Horizontal extents overlap (strict)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.left() < right && self.right() > left
    }

    /// Strict AABB-vs-AABB overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other.left(), other.right())
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn translated(&self, dx: f32) -> Self {
        Self {
            min: self.min + Vec2::new(dx, 0.0),
            size: self.size,
        }
    }
}
