//! Per-frame simulation step for the live run

use super::kinematics;
use super::state::{RunContext, RunPhase};
use crate::consts::*;

/// Bound a raw frame delta before it reaches the integrator
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the live run by one frame
///
/// Order: scroll the world, integrate the actor, hit-test the active
/// obstacles (first hit ends the run), check for the level end, cull, then
/// animate particles. Particles keep animating after the run ends.
pub fn tick(run: &mut RunContext, dt: f32) {
    let dt = clamp_dt(dt);

    if run.phase == RunPhase::Running {
        run.world.advance(dt);
        kinematics::integrate(&mut run.actor, 1.0, dt, run.ground_y);

        let bounds = run.actor.track_bounds(run.world.camera_x);
        let length = run.level.as_ref().map_or(0.0, |l| l.length);
        if run.world.first_hit(&bounds, run.ground_y).is_some() {
            run.crash();
        } else if length > 0.0 && run.world.distance >= length {
            run.complete();
        }

        if run.phase == RunPhase::Running {
            run.world.cull();
        }
    }

    run.particles.advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;
    use crate::sim::obstacle::{ObstacleKind, ObstacleSpec};
    use crate::sim::state::RunEvent;

    const GROUND: f32 = 480.0;
    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn clamps_frame_hitches() {
        assert_eq!(clamp_dt(0.5), MAX_FRAME_DT);
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(0.01), 0.01);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut run = RunContext::new(GROUND, 3);
        tick(&mut run, FRAME);
        assert_eq!(run.phase, RunPhase::Idle);
        assert_eq!(run.distance(), 0.0);
    }

    #[test]
    fn large_dt_is_clamped() {
        let mut run = RunContext::new(GROUND, 3);
        run.start_level(&Level::new("e", "Empty", 5000.0));
        tick(&mut run, 1.0);
        assert!((run.distance() - BASE_SPEED * MAX_FRAME_DT).abs() < 1e-3);
    }

    #[test]
    fn crash_freezes_world() {
        let level = Level::new("g", "Gap", 5000.0)
            .with_obstacle(ObstacleSpec::new(ObstacleKind::Gap, 250.0, 100.0, 0.0));
        let mut run = RunContext::new(GROUND, 3);
        run.start_level(&level);
        for _ in 0..120 {
            tick(&mut run, FRAME);
        }
        assert_eq!(run.phase, RunPhase::Crashed);
        let frozen = run.distance();
        assert_eq!(run.final_distance(), Some(frozen));
        for _ in 0..10 {
            tick(&mut run, FRAME);
        }
        assert_eq!(run.distance(), frozen);
        assert!(
            run.take_events()
                .iter()
                .any(|e| matches!(e, RunEvent::Crashed { .. }))
        );
    }

    #[test]
    fn crash_burst_fades_out() {
        let level = Level::new("g", "Gap", 5000.0)
            .with_obstacle(ObstacleSpec::new(ObstacleKind::Gap, 150.0, 100.0, 0.0));
        let mut run = RunContext::new(GROUND, 3);
        run.start_level(&level);
        tick(&mut run, FRAME);
        assert_eq!(run.phase, RunPhase::Crashed);
        assert_eq!(run.particles.len(), BURST_COUNT);
        for _ in 0..60 {
            tick(&mut run, FRAME);
        }
        assert!(run.particles.is_empty());
    }

    #[test]
    fn reaching_length_completes() {
        let mut run = RunContext::new(GROUND, 3);
        run.start_level(&Level::new("s", "Short", 100.0));
        for _ in 0..40 {
            tick(&mut run, FRAME);
        }
        assert_eq!(run.phase, RunPhase::Completed);
        let d = run.final_distance().unwrap();
        assert!(d >= 100.0 && d < 100.0 + BASE_SPEED * FRAME + 1e-3);
    }
}
