//! Color Dash entry point
//!
//! The browser build is driven from `platform::web`. Natively this replays
//! every level in the library headlessly, letting the look-ahead heuristic
//! press jump, and logs how far each run gets.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use color_dash::consts::*;
    use color_dash::persistence::LevelLibrary;
    use color_dash::sim::{RunContext, RunEvent, RunPhase, obstacle_ahead, tick};
    use color_dash::{HighScores, Settings, ground_line};

    env_logger::init();
    log::info!("Color Dash (native) starting...");

    let settings = Settings::load();
    let library = LevelLibrary::load();
    let mut high_scores = HighScores::load();
    let ground_y = ground_line(DEFAULT_GROUND_Y / GROUND_RATIO);
    let dt = 1.0 / 60.0;

    for level in library.levels() {
        let mut run = RunContext::new(ground_y, 0x00c0_ffee);
        run.set_skin(settings.skin());
        run.set_particle_cap(settings.max_particles());
        run.start_level(level);

        // Ten minutes of frames at most
        for _ in 0..36_000 {
            let ahead = obstacle_ahead(
                run.world.obstacles.iter().map(|o| &o.spec),
                run.world.camera_x,
                run.actor.x,
                PREVIEW_LOOKAHEAD,
            );
            if ahead {
                run.jump();
            }
            tick(&mut run, dt);
            if run.phase != RunPhase::Running {
                break;
            }
        }

        let events = run.take_events();
        let jumps = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Jumped))
            .count();
        for event in &events {
            high_scores.record_event(event);
        }
        let distance = run.final_distance().unwrap_or_else(|| run.distance());
        log::info!(
            "{}: {:?} at {:.0} after {} jumps",
            level.menu_label(),
            run.phase,
            distance,
            jumps
        );
    }

    println!("{}", high_scores.hud_label());
    high_scores.save();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
