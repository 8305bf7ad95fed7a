//! Live run context and its state machine
//!
//! `Idle` (no level) → `Running` → `Crashed` | `Completed` → `Running` via restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kinematics::{self, Actor};
use super::level::Level;
use super::particles::{MAX_PARTICLES, ParticlePool};
use super::world::World;
use crate::consts::*;
use crate::skins::{self, Skin};

/// Current phase of a live run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No level loaded yet
    Idle,
    /// Actor alive, world scrolling
    Running,
    /// Hit an obstacle
    Crashed,
    /// Reached the end of the level
    Completed,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Crashed | RunPhase::Completed)
    }
}

/// Things that happened during a run, drained by audio/scoring glue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Started { level_id: String },
    Jumped,
    Crashed { distance: f32 },
    Completed { distance: f32 },
}

/// Everything owned by one live run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub phase: RunPhase,
    /// Pristine copy of the loaded level, used by restart
    pub level: Option<Level>,
    pub world: World,
    pub actor: Actor,
    pub particles: ParticlePool,
    /// Screen y of the running surface
    pub ground_y: f32,
    skin: &'static Skin,
    rng: Pcg32,
    seed: u64,
    particle_cap: usize,
    final_distance: Option<f32>,
    events: Vec<RunEvent>,
}

impl RunContext {
    pub fn new(ground_y: f32, seed: u64) -> Self {
        Self {
            phase: RunPhase::Idle,
            level: None,
            world: World::default(),
            actor: Actor::new(PLAYER_X, PLAYER_SIZE, ground_y),
            particles: ParticlePool::new(seed),
            ground_y,
            skin: &skins::SKINS[0],
            rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            seed,
            particle_cap: MAX_PARTICLES,
            final_distance: None,
            events: Vec::new(),
        }
    }

    /// Skin applied from the next (re)start
    pub fn set_skin(&mut self, skin: &'static Skin) {
        self.skin = skin;
    }

    pub fn skin(&self) -> &'static Skin {
        self.skin
    }

    /// Particle cap applied from the next (re)start
    pub fn set_particle_cap(&mut self, cap: usize) {
        self.particle_cap = cap;
    }

    /// Move the ground line (viewport resize), keeping a grounded actor on it
    pub fn set_ground(&mut self, ground_y: f32) {
        self.ground_y = ground_y;
        if self.actor.grounded {
            self.actor.reset(ground_y);
        }
    }

    /// Load `level` and start running it
    pub fn start_level(&mut self, level: &Level) {
        self.level = Some(level.clone());
        self.begin();
    }

    /// Start the loaded level over; no-op while idle
    pub fn restart(&mut self) {
        if self.level.is_none() {
            return;
        }
        self.begin();
    }

    fn begin(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        self.world = World::new(level, BASE_SPEED);
        self.particles = ParticlePool::with_capacity(self.seed, self.particle_cap);
        self.actor = Actor::new(PLAYER_X, PLAYER_SIZE, self.ground_y);
        let face = self.skin.random_face(&mut self.rng);
        self.actor.dress(self.skin, face);
        self.final_distance = None;
        self.phase = RunPhase::Running;
        log::info!(
            "Run started: {} ({} obstacles)",
            level.name,
            self.world.obstacles.len()
        );
        self.events.push(RunEvent::Started {
            level_id: level.id.clone(),
        });
    }

    /// False in every terminal phase, completed runs included
    pub fn alive(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Jump if running and grounded
    pub fn jump(&mut self) {
        if !self.running() {
            return;
        }
        if kinematics::jump(&mut self.actor, true, JUMP_VELOCITY) {
            let feet = Vec2::new(
                self.world.camera_x + self.actor.x + self.actor.size / 2.0,
                self.actor.bottom(),
            );
            self.particles
                .spawn_burst(feet, BURST_COUNT, self.skin.particle_color());
            self.events.push(RunEvent::Jumped);
        }
    }

    /// The single input action: restart a finished run, otherwise jump
    pub fn activate(&mut self) {
        if self.phase.is_terminal() {
            self.restart();
        } else {
            self.jump();
        }
    }

    /// Enter the crashed state, freezing the world at its current distance
    pub(crate) fn crash(&mut self) {
        let distance = self.world.distance;
        self.phase = RunPhase::Crashed;
        self.final_distance = Some(distance);
        let (cx, cy) = self.actor.center();
        self.particles.spawn_burst(
            Vec2::new(self.world.camera_x + cx, cy),
            BURST_COUNT,
            self.skin.particle_color(),
        );
        log::info!("Crashed at distance {:.0}", distance);
        self.events.push(RunEvent::Crashed { distance });
    }

    pub(crate) fn complete(&mut self) {
        let distance = self.world.distance;
        self.phase = RunPhase::Completed;
        self.final_distance = Some(distance);
        log::info!("Level complete at distance {:.0}", distance);
        self.events.push(RunEvent::Completed { distance });
    }

    /// Live distance for the HUD
    pub fn distance(&self) -> f32 {
        self.world.distance
    }

    /// Distance at which the last run ended, if it has
    pub fn final_distance(&self) -> Option<f32> {
        self.final_distance
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{ObstacleKind, ObstacleSpec};

    fn level() -> Level {
        Level::new("t", "Test", 2000.0)
            .with_obstacle(ObstacleSpec::new(ObstacleKind::Block, 500.0, 100.0, 80.0))
    }

    #[test]
    fn idle_ignores_jump_and_restart() {
        let mut run = RunContext::new(480.0, 1);
        run.jump();
        run.restart();
        run.activate();
        assert_eq!(run.phase, RunPhase::Idle);
        assert!(run.take_events().is_empty());
        assert!(run.actor.grounded);
    }

    #[test]
    fn start_level_resets_everything() {
        let mut run = RunContext::new(480.0, 1);
        run.set_skin(skins::skin_by_id("violet"));
        run.start_level(&level());
        assert_eq!(run.phase, RunPhase::Running);
        assert!(run.alive() && run.running());
        assert_eq!(run.world.distance, 0.0);
        assert_eq!(run.world.speed, BASE_SPEED);
        assert_eq!(run.world.obstacles.len(), 1);
        assert_eq!(run.actor.bottom(), 480.0);
        assert_eq!(run.actor.skin_id, "violet");
        assert!(run.particles.is_empty());
        assert_eq!(
            run.take_events(),
            vec![RunEvent::Started {
                level_id: "t".into()
            }]
        );
    }

    #[test]
    fn jump_bursts_and_records_event() {
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&level());
        run.take_events();
        run.jump();
        assert!(!run.actor.grounded);
        assert_eq!(run.actor.vy, JUMP_VELOCITY);
        assert_eq!(run.particles.len(), BURST_COUNT);
        run.jump();
        assert_eq!(run.take_events(), vec![RunEvent::Jumped]);
    }

    #[test]
    fn terminal_ignores_jump() {
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&level());
        run.crash();
        assert!(!run.alive() && !run.running());
        run.jump();
        assert!(run.actor.grounded);
        assert_eq!(run.final_distance(), Some(0.0));
    }

    #[test]
    fn activate_restarts_after_crash() {
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&level());
        run.world.distance = 123.0;
        run.crash();
        run.activate();
        assert_eq!(run.phase, RunPhase::Running);
        assert_eq!(run.distance(), 0.0);
        assert_eq!(run.final_distance(), None);
    }

    #[test]
    fn completed_run_is_neither_alive_nor_running() {
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&level());
        run.world.distance = 2000.0;
        run.complete();
        assert!(run.phase.is_terminal());
        assert!(!run.alive() && !run.running());
        run.jump();
        assert!(run.actor.grounded);
        assert_eq!(run.final_distance(), Some(2000.0));
    }
}
