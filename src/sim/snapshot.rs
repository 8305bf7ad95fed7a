//! Read-only per-frame views for renderers and the HUD

use serde::Serialize;

use super::kinematics::Actor;
use super::obstacle::ObstacleKind;
use super::particles::Particle;
use super::preview::PreviewContext;
use super::state::{RunContext, RunPhase};
use super::world::World;
use crate::color::Rgb;
use crate::skins::Face;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub face: Face,
    pub grounded: bool,
}

impl From<&Actor> for ActorView {
    fn from(a: &Actor) -> Self {
        Self {
            x: a.x,
            y: a.y,
            size: a.size,
            color: a.color,
            face: a.face,
            grounded: a.grounded,
        }
    }
}

/// Obstacle in screen space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

/// Particle in screen space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: RunPhase,
    pub distance: f32,
    pub camera_x: f32,
    pub ground_y: f32,
    pub passed: usize,
    pub actor: ActorView,
    pub obstacles: Vec<ObstacleView>,
    pub particles: Vec<ParticleView>,
}

fn obstacle_views(world: &World, ground_y: f32) -> Vec<ObstacleView> {
    world
        .obstacles
        .iter()
        .map(|o| ObstacleView {
            kind: o.spec.kind,
            x: o.spec.x - world.camera_x,
            y: ground_y - o.spec.height,
            width: o.spec.width,
            height: o.spec.height,
            color: o.spec.color,
        })
        .collect()
}

fn particle_views(particles: &[Particle], camera_x: f32) -> Vec<ParticleView> {
    particles
        .iter()
        .map(|p| ParticleView {
            x: p.pos.x - camera_x,
            y: p.pos.y,
            size: p.size,
            color: p.color,
            alpha: p.alpha(),
        })
        .collect()
}

impl RunContext {
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            distance: self.world.distance,
            camera_x: self.world.camera_x,
            ground_y: self.ground_y,
            passed: self.world.passed_count(),
            actor: ActorView::from(&self.actor),
            obstacles: obstacle_views(&self.world, self.ground_y),
            particles: particle_views(self.particles.particles(), self.world.camera_x),
        }
    }
}

impl PreviewContext {
    /// Preview frames report `Running`; the preview has no end state
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: RunPhase::Running,
            distance: self.world.distance,
            camera_x: self.world.camera_x,
            ground_y: self.ground_y,
            passed: self.world.passed_count(),
            actor: ActorView::from(&self.actor),
            obstacles: obstacle_views(&self.world, self.ground_y),
            particles: Vec::new(),
        }
    }
}
