//! Vertical kinematics shared by the live player and the preview agent
//!
//! Screen coordinates: +y points down, the ground line is a fixed y.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::color::Rgb;
use crate::consts::*;
use crate::skins::{Face, Skin};

/// A square body subject to gravity (live player or preview agent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Fixed screen column of the left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Vertical velocity (negative is up)
    pub vy: f32,
    /// Side length
    pub size: f32,
    pub grounded: bool,
    pub skin_id: String,
    pub color: Rgb,
    pub face: Face,
}

impl Actor {
    /// Actor standing on the ground line
    pub fn new(x: f32, size: f32, ground_y: f32) -> Self {
        Self {
            x,
            y: ground_y - size,
            vy: 0.0,
            size,
            grounded: true,
            skin_id: String::new(),
            color: Rgb::default(),
            face: Face::default(),
        }
    }

    /// Apply cosmetic skin data
    pub fn dress(&mut self, skin: &Skin, face: Face) {
        self.skin_id = skin.id.to_string();
        self.color = skin.color;
        self.face = face;
    }

    /// Put the actor back on the ground, at rest
    pub fn reset(&mut self, ground_y: f32) {
        self.y = ground_y - self.size;
        self.vy = 0.0;
        self.grounded = true;
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    /// Center point in screen space
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Bounding box in track space for a camera offset
    pub fn track_bounds(&self, camera_x: f32) -> Aabb {
        Aabb::new(self.x + camera_x, self.y, self.size, self.size)
    }
}

/// Advance an actor by `dt` under `GRAVITY * gravity_scale`, landing on `ground_y`
pub fn integrate(actor: &mut Actor, gravity_scale: f32, dt: f32, ground_y: f32) {
    actor.vy += GRAVITY * gravity_scale * dt;
    actor.y += actor.vy * dt;

    if actor.bottom() >= ground_y {
        actor.y = ground_y - actor.size;
        actor.vy = 0.0;
        actor.grounded = true;
    } else {
        actor.grounded = false;
    }
}

/// Launch the actor upward if it is alive and on the ground
///
/// Returns whether the jump happened.
pub fn jump(actor: &mut Actor, alive: bool, impulse: f32) -> bool {
    if !alive || !actor.grounded {
        return false;
    }
    actor.vy = impulse;
    actor.grounded = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GROUND: f32 = 480.0;

    fn airborne(y: f32, vy: f32) -> Actor {
        let mut a = Actor::new(PLAYER_X, PLAYER_SIZE, GROUND);
        a.y = y;
        a.vy = vy;
        a.grounded = false;
        a
    }

    #[test]
    fn grounded_actor_stays_pinned() {
        let mut a = Actor::new(PLAYER_X, PLAYER_SIZE, GROUND);
        for _ in 0..100 {
            integrate(&mut a, 1.0, 0.016, GROUND);
            assert_eq!(a.vy, 0.0);
            assert_eq!(a.bottom(), GROUND);
            assert!(a.grounded);
        }
    }

    #[test]
    fn jump_requires_ground_and_life() {
        let mut a = Actor::new(PLAYER_X, PLAYER_SIZE, GROUND);
        assert!(!jump(&mut a, false, JUMP_VELOCITY));
        assert!(a.grounded);

        assert!(jump(&mut a, true, JUMP_VELOCITY));
        assert_eq!(a.vy, JUMP_VELOCITY);
        assert!(!a.grounded);

        // Airborne: second jump ignored
        a.vy = -100.0;
        assert!(!jump(&mut a, true, JUMP_VELOCITY));
        assert_eq!(a.vy, -100.0);
    }

    #[test]
    fn jump_lands_again() {
        let mut a = Actor::new(PLAYER_X, PLAYER_SIZE, GROUND);
        jump(&mut a, true, JUMP_VELOCITY);
        let mut peak = a.y;
        for _ in 0..120 {
            integrate(&mut a, 1.0, 1.0 / 60.0, GROUND);
            peak = peak.min(a.y);
        }
        assert!(a.grounded);
        assert_eq!(a.vy, 0.0);
        // v²/2g ≈ 106.8 above the resting top edge
        let rise = (GROUND - PLAYER_SIZE) - peak;
        assert!(rise > 95.0 && rise < 110.0, "rise {rise}");
    }

    #[test]
    fn half_gravity_rises_slower() {
        let mut full = airborne(200.0, 0.0);
        let mut half = airborne(200.0, 0.0);
        integrate(&mut full, 1.0, 0.01, GROUND);
        integrate(&mut half, PREVIEW_GRAVITY_SCALE, 0.01, GROUND);
        assert!((full.vy - 18.0).abs() < 1e-4);
        assert!((half.vy - 9.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn airborne_velocity_gains_gravity(vy in -600.0f32..200.0, dt in 0.001f32..0.032) {
            // High enough that one step cannot reach the ground
            let mut a = airborne(0.0, vy);
            integrate(&mut a, 1.0, dt, GROUND);
            prop_assert!(!a.grounded);
            prop_assert!((a.vy - (vy + GRAVITY * dt)).abs() < 1e-3);
            prop_assert!(a.vy > vy);
        }

        #[test]
        fn grounded_jump_sets_impulse(prior in -1000.0f32..1000.0) {
            let mut a = Actor::new(PLAYER_X, PLAYER_SIZE, GROUND);
            a.vy = prior;
            prop_assert!(jump(&mut a, true, JUMP_VELOCITY));
            prop_assert_eq!(a.vy, JUMP_VELOCITY);
            prop_assert!(!a.grounded);
        }
    }
}
