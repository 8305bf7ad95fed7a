//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Frame deltas are clamped before integration
//! - Seeded RNG only (particles, faces)
//! - Live run and editor preview own disjoint state
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod level;
pub mod obstacle;
pub mod particles;
pub mod preview;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::Aabb;
pub use kinematics::{Actor, integrate, jump};
pub use level::{Level, sample_levels};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSpec};
pub use particles::{Particle, ParticlePool};
pub use preview::{PreviewContext, obstacle_ahead, preview_tick};
pub use snapshot::FrameSnapshot;
pub use state::{RunContext, RunEvent, RunPhase};
pub use tick::{clamp_dt, tick};
pub use world::World;
