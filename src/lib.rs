//! Color Dash - a one-button cube runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, live run, editor preview)
//! - `driver`: Frame clock and tick registration for host schedulers
//! - `persistence`: Level library, import/export
//! - `editor`: Level drafts produced by the timeline editor
//! - `platform`: Browser bindings

pub mod color;
pub mod driver;
pub mod editor;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod skins;

pub use color::Rgb;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration applied to actors (units/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -620.0;
    /// Horizontal scroll speed of a live run (units/s)
    pub const BASE_SPEED: f32 = 360.0;

    /// Live player column and cube size
    pub const PLAYER_X: f32 = 140.0;
    pub const PLAYER_SIZE: f32 = 56.0;

    /// Obstacles whose right edge is this far behind the camera are dropped
    pub const CULL_MARGIN: f32 = 400.0;

    /// Largest frame delta fed to the integrator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Ground line as a fraction of viewport height
    pub const GROUND_RATIO: f32 = 0.78;
    /// Ground line used when no viewport is known
    pub const DEFAULT_GROUND_Y: f32 = 480.0;

    /// Gap hit-test tolerance above the ground line
    pub const GAP_EPSILON: f32 = 1.0;

    /// Particles per jump/crash burst
    pub const BURST_COUNT: usize = 12;
    /// Downward pull on particles (units/s²)
    pub const PARTICLE_GRAVITY: f32 = 1200.0;

    /// Editor preview tuning
    pub const PREVIEW_GRAVITY_SCALE: f32 = 0.5;
    pub const PREVIEW_JUMP_VELOCITY: f32 = -380.0;
    pub const PREVIEW_MIN_SPEED: f32 = 120.0;
    pub const PREVIEW_PLAYER_X: f32 = 60.0;
    pub const PREVIEW_PLAYER_SIZE: f32 = 40.0;
    pub const PREVIEW_LOOKAHEAD: f32 = 160.0;
    /// Loop length for levels that declare none
    pub const PREVIEW_DEFAULT_LENGTH: f32 = 2200.0;
}

/// Ground line for a viewport of the given height
#[inline]
pub fn ground_line(viewport_height: f32) -> f32 {
    (viewport_height * consts::GROUND_RATIO).round()
}
