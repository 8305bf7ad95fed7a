//! Browser bindings
//!
//! The page owns `requestAnimationFrame` and DOM wiring; it forwards input
//! and timestamps here and reads back JSON snapshots to draw. A loop only
//! keeps requesting frames while its `*_active()` flag is set.

use wasm_bindgen::prelude::*;

use crate::driver::{FrameDriver, FrameHandle, FrameScheduler};
use crate::editor::{Brush, LevelDraft};
use crate::highscores::HighScores;
use crate::persistence::{self, LevelLibrary};
use crate::settings::Settings;
use crate::sim::{ObstacleKind, RunContext};
use crate::{consts, ground_line};

/// Hands out frame handles; the page polls activity instead of holding callbacks
#[derive(Debug, Default)]
struct PageScheduler {
    next: u32,
}

impl FrameScheduler for PageScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        FrameHandle(self.next)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        log::debug!("Frame callback {} released", handle.0);
    }
}

#[wasm_bindgen]
pub struct WebGame {
    driver: FrameDriver,
    scheduler: PageScheduler,
    library: LevelLibrary,
    settings: Settings,
    high_scores: HighScores,
    draft: Option<LevelDraft>,
    ground_y: f32,
    preview_ground_y: f32,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_height: f32, preview_height: f32, seed: u64) -> WebGame {
        let settings = Settings::load();
        let ground_y = ground_line(viewport_height);
        let mut run = RunContext::new(ground_y, seed);
        run.set_skin(settings.skin());
        run.set_particle_cap(settings.max_particles());

        let mut scheduler = PageScheduler::default();
        let mut driver = FrameDriver::new();
        driver.attach_run(run, &mut scheduler);

        WebGame {
            driver,
            scheduler,
            library: LevelLibrary::load(),
            settings,
            high_scores: HighScores::load(),
            draft: None,
            ground_y,
            preview_ground_y: ground_line(preview_height),
        }
    }

    /// Level picker entries as JSON `[{id, label}]`
    pub fn level_menu(&self) -> String {
        let items: Vec<_> = self
            .library
            .levels()
            .iter()
            .map(|l| serde_json::json!({ "id": l.id, "label": l.menu_label() }))
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    pub fn start_level(&mut self, id: &str) -> bool {
        let Some(run) = self.driver.run.as_mut() else {
            return false;
        };
        match self.library.get(id) {
            Ok(level) => {
                run.set_skin(self.settings.skin());
                run.set_particle_cap(self.settings.max_particles());
                run.start_level(level);
            }
            Err(e) => {
                log::warn!("{}", e);
                return false;
            }
        }
        self.driver.resume_run(&mut self.scheduler);
        true
    }

    /// Keyboard/pointer/touch activation
    pub fn activate(&mut self) {
        if let Some(run) = self.driver.run.as_mut() {
            run.activate();
        }
    }

    pub fn restart(&mut self) {
        if let Some(run) = self.driver.run.as_mut() {
            run.restart();
        }
    }

    pub fn resize(&mut self, viewport_height: f32) {
        self.ground_y = ground_line(viewport_height);
        if let Some(run) = self.driver.run.as_mut() {
            run.set_ground(self.ground_y);
        }
    }

    /// Advance the live run; returns events as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let events = self.driver.run_frame(now_ms);
        let improved = events
            .iter()
            .fold(false, |acc, e| self.high_scores.record_event(e) || acc);
        if improved {
            self.high_scores.save();
        }
        serde_json::to_string(&events).unwrap_or_default()
    }

    pub fn snapshot(&self) -> String {
        self.driver
            .run
            .as_ref()
            .and_then(|r| serde_json::to_string(&r.snapshot()).ok())
            .unwrap_or_default()
    }

    pub fn hud_distance(&self) -> String {
        let d = self.driver.run.as_ref().map_or(0.0, |r| r.distance());
        format!("Distance: {}", d.floor())
    }

    pub fn hud_high(&self) -> String {
        self.high_scores.hud_label()
    }

    pub fn reset_high_scores(&mut self) {
        self.high_scores.reset();
    }

    pub fn run_active(&self) -> bool {
        self.driver.run_active()
    }

    /// Page navigation/teardown
    pub fn stop(&mut self) {
        self.driver.stop_run(&mut self.scheduler);
        self.driver.stop_preview(&mut self.scheduler);
    }

    pub fn select_skin(&mut self, id: &str) {
        self.settings.select_skin(id);
        self.settings.save();
        if let Some(run) = self.driver.run.as_mut() {
            run.set_skin(self.settings.skin());
        }
    }

    /// Returns the quality button label
    pub fn set_quality(&mut self, name: &str) -> String {
        if self.settings.set_quality(name) {
            self.settings.save();
            if let Some(run) = self.driver.run.as_mut() {
                run.set_particle_cap(self.settings.max_particles());
            }
        }
        self.settings.quality_label()
    }

    pub fn toggle_music(&mut self) -> String {
        self.settings.toggle_music();
        self.settings.save();
        self.settings.music_label().to_string()
    }

    // === Editor ===

    /// Open the editor on a new draft, or on a copy of level `id`
    pub fn open_editor(&mut self, id: Option<String>) {
        let draft = match id.as_deref().map(|id| self.library.get(id)) {
            Some(Ok(level)) => LevelDraft::from_level(level),
            _ => LevelDraft::new(super::now_ms() as u64),
        };
        self.draft = Some(draft);
        self.refresh_preview();
    }

    pub fn close_editor(&mut self) {
        self.driver.stop_preview(&mut self.scheduler);
        self.draft = None;
    }

    /// Replace the draft with the first sample level
    pub fn load_sample(&mut self) {
        if let Some(level) = crate::sim::sample_levels().into_iter().next() {
            self.draft = Some(LevelDraft::from_level(&level));
            self.refresh_preview();
        }
    }

    pub fn place_obstacle(&mut self, fraction: f32, kind: &str, width: f32, height: f32, color: &str) {
        let kind = match kind {
            "spike" => ObstacleKind::Spike,
            "gap" => ObstacleKind::Gap,
            _ => ObstacleKind::Block,
        };
        let brush = Brush {
            kind,
            width,
            height,
            color: color.parse().unwrap_or_default(),
        };
        if let Some(draft) = self.draft.as_mut() {
            draft.place(fraction, &brush);
            self.refresh_preview();
        }
    }

    pub fn remove_obstacle(&mut self, fraction: f32) -> bool {
        let removed = self
            .draft
            .as_mut()
            .and_then(|d| d.remove_at(fraction))
            .is_some();
        if removed {
            self.refresh_preview();
        }
        removed
    }

    pub fn save_draft(&mut self, name: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.rename(name);
            self.library.upsert(draft.level.clone());
            self.library.save();
        }
    }

    pub fn export_draft(&self) -> String {
        self.draft
            .as_ref()
            .and_then(|d| persistence::export_level(&d.level).ok())
            .unwrap_or_default()
    }

    pub fn preview_frame(&mut self, now_ms: f64) {
        self.driver.preview_frame(now_ms);
    }

    pub fn preview_snapshot(&self) -> String {
        self.driver
            .preview
            .as_ref()
            .and_then(|p| serde_json::to_string(&p.snapshot()).ok())
            .unwrap_or_default()
    }

    pub fn preview_active(&self) -> bool {
        self.driver.preview_active()
    }

    pub fn resize_preview(&mut self, preview_height: f32) {
        self.preview_ground_y = ground_line(preview_height);
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        if let Some(draft) = self.draft.as_ref() {
            self.driver
                .start_preview(&draft.level, self.preview_ground_y, &mut self.scheduler);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!(
        "Color Dash starting (ground ratio {})",
        consts::GROUND_RATIO
    );
}
