//! Scrolling track state: camera, distance and the active obstacle window

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::Level;
use super::obstacle::Obstacle;
use crate::consts::CULL_MARGIN;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Horizontal scroll offset; obstacles draw at `x - camera_x`
    pub camera_x: f32,
    /// Distance traveled this run
    pub distance: f32,
    /// Constant for the whole run
    pub speed: f32,
    /// Obstacles not yet culled
    pub obstacles: Vec<Obstacle>,
}

impl World {
    /// Fresh world at the start of `level`
    pub fn new(level: &Level, speed: f32) -> Self {
        Self {
            camera_x: 0.0,
            distance: 0.0,
            speed,
            obstacles: level.obstacles.iter().map(Obstacle::spawn).collect(),
        }
    }

    /// Scroll by `speed * dt`, returning the distance moved
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dx = self.speed * dt;
        self.camera_x += dx;
        self.distance += dx;
        dx
    }

    /// Drop obstacles whose right edge is more than the margin behind the camera
    pub fn cull(&mut self) -> usize {
        let limit = self.camera_x - CULL_MARGIN;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.spec.right() >= limit);
        let dropped = before - self.obstacles.len();
        if dropped > 0 {
            log::debug!("Culled {} obstacles at camera {:.0}", dropped, self.camera_x);
        }
        dropped
    }

    /// Flag obstacles entirely behind `left` as passed, then return the first
    /// obstacle that hits `actor`, stopping at that hit
    pub fn first_hit(&mut self, actor: &Aabb, ground_y: f32) -> Option<usize> {
        for (i, obs) in self.obstacles.iter_mut().enumerate() {
            if !obs.passed && obs.spec.right() < actor.left() {
                obs.passed = true;
            }
            if obs.collides(actor, ground_y) {
                return Some(i);
            }
        }
        None
    }

    pub fn passed_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.passed).count()
    }
}
