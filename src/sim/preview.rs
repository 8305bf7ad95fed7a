//! Self-driving editor preview
//!
//! Runs the same integrator and hit tests as a live run against a level
//! that is still being authored. The agent jumps when an obstacle enters its
//! look-ahead window, loops at the end of the level and never loses.

use super::kinematics::{self, Actor};
use super::level::Level;
use super::obstacle::ObstacleSpec;
use super::tick::clamp_dt;
use super::world::World;
use crate::consts::*;

/// True if any obstacle's leading edge sits strictly inside
/// `(actor_x, actor_x + window)` in screen space
pub fn obstacle_ahead<'a, I>(obstacles: I, camera_x: f32, actor_x: f32, window: f32) -> bool
where
    I: IntoIterator<Item = &'a ObstacleSpec>,
{
    obstacles.into_iter().any(|o| {
        let screen_x = o.x - camera_x;
        screen_x > actor_x && screen_x < actor_x + window
    })
}

/// Preview speed derived from the live base speed
pub fn preview_speed() -> f32 {
    (BASE_SPEED * 0.5).max(PREVIEW_MIN_SPEED)
}

#[derive(Debug, Clone)]
pub struct PreviewContext {
    pub level: Level,
    pub world: World,
    pub actor: Actor,
    pub ground_y: f32,
    /// Agent currently overlapping an obstacle (drawn as a flash)
    pub touching: bool,
    /// Obstacle contacts since the preview started
    pub hits: u32,
    /// Times the preview wrapped back to the start
    pub loops: u32,
}

impl PreviewContext {
    pub fn new(level: &Level, ground_y: f32) -> Self {
        log::info!(
            "Preview started: {} ({} obstacles)",
            level.name,
            level.obstacles.len()
        );
        Self {
            level: level.clone(),
            world: World::new(level, preview_speed()),
            actor: Actor::new(PREVIEW_PLAYER_X, PREVIEW_PLAYER_SIZE, ground_y),
            ground_y,
            touching: false,
            hits: 0,
            loops: 0,
        }
    }

    /// Length after which the preview wraps
    pub fn loop_length(&self) -> f32 {
        self.level.length_or(PREVIEW_DEFAULT_LENGTH)
    }

    /// Back to the start of the level with the agent on the ground
    pub fn rewind(&mut self) {
        self.world = World::new(&self.level, preview_speed());
        self.actor.reset(self.ground_y);
        self.touching = false;
    }

    pub fn distance(&self) -> f32 {
        self.world.distance
    }
}

/// Advance the preview by one frame
pub fn preview_tick(preview: &mut PreviewContext, dt: f32) {
    let dt = clamp_dt(dt);

    preview.world.advance(dt);
    kinematics::integrate(
        &mut preview.actor,
        PREVIEW_GRAVITY_SCALE,
        dt,
        preview.ground_y,
    );

    let bounds = preview.actor.track_bounds(preview.world.camera_x);
    let touching = preview
        .world
        .first_hit(&bounds, preview.ground_y)
        .is_some();
    if touching && !preview.touching {
        preview.hits += 1;
    }
    preview.touching = touching;

    if preview.actor.grounded
        && obstacle_ahead(
            preview.world.obstacles.iter().map(|o| &o.spec),
            preview.world.camera_x,
            preview.actor.x,
            PREVIEW_LOOKAHEAD,
        )
    {
        kinematics::jump(&mut preview.actor, true, PREVIEW_JUMP_VELOCITY);
    }

    if preview.world.distance > preview.loop_length() {
        preview.rewind();
        preview.loops += 1;
        log::debug!("Preview looped ({})", preview.loops);
    } else {
        preview.world.cull();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    const GROUND: f32 = 300.0;
    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn lookahead_window_is_open() {
        let obs = [ObstacleSpec::new(ObstacleKind::Block, 300.0, 40.0, 40.0)];
        assert!(obstacle_ahead(&obs, 100.0, 60.0, 160.0));
        // Leading edge exactly at the window bounds
        assert!(!obstacle_ahead(&obs, 240.0, 60.0, 160.0));
        assert!(!obstacle_ahead(&obs, 80.0, 60.0, 160.0));
    }

    #[test]
    fn speed_is_half_base() {
        assert_eq!(preview_speed(), 180.0);
    }

    #[test]
    fn jumps_when_obstacle_in_window() {
        let level = Level::new("p", "Preview", 2200.0)
            .with_obstacle(ObstacleSpec::new(ObstacleKind::Block, 200.0, 40.0, 30.0));
        let mut preview = PreviewContext::new(&level, GROUND);
        preview_tick(&mut preview, FRAME);
        assert!(!preview.actor.grounded);
        assert_eq!(preview.actor.vy, PREVIEW_JUMP_VELOCITY);
    }

    #[test]
    fn loops_instead_of_ending() {
        let level = Level::new("p", "Preview", 300.0)
            .with_obstacle(ObstacleSpec::new(ObstacleKind::Gap, 90.0, 400.0, 0.0));
        let mut preview = PreviewContext::new(&level, GROUND);
        let mut max_distance: f32 = 0.0;
        for _ in 0..240 {
            preview_tick(&mut preview, FRAME);
            max_distance = max_distance.max(preview.distance());
        }
        assert!(preview.hits > 0);
        assert!(preview.loops >= 1);
        assert!(max_distance <= 300.0 + preview_speed() * FRAME);
        assert_eq!(preview.world.obstacles.len(), 1);
    }

    #[test]
    fn undeclared_length_uses_default() {
        let preview = PreviewContext::new(&Level::new("p", "Draft", 0.0), GROUND);
        assert_eq!(preview.loop_length(), PREVIEW_DEFAULT_LENGTH);
    }
}
