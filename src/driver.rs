//! Host frame driving
//!
//! The host calls `FrameDriver::frame` once per animation tick with its
//! timestamp. The live run and the editor preview are advanced independently;
//! each holds a tick registration with the host scheduler that is cancelled
//! at most once when that context is stopped.

use crate::sim::{PreviewContext, RunContext, clamp_dt, preview_tick, tick};
use crate::sim::{Level, RunEvent};

/// Turns host timestamps (milliseconds) into clamped frame deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Delta since the previous call; the first call yields zero
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt)
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Opaque id of a recurring callback registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Host side of the recurring frame callback (e.g. `requestAnimationFrame`)
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A registration that can be released exactly once
#[derive(Debug, Default)]
pub struct TickRegistration {
    handle: Option<FrameHandle>,
}

impl TickRegistration {
    /// Register with the scheduler, replacing any previous registration
    pub fn register<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.handle = Some(scheduler.request_frame());
    }

    /// Cancel if registered; repeated calls do nothing
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.handle.take() {
            Some(handle) => {
                scheduler.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

/// Owns whichever simulation contexts are currently active
#[derive(Debug, Default)]
pub struct FrameDriver {
    pub run: Option<RunContext>,
    pub preview: Option<PreviewContext>,
    run_clock: FrameClock,
    preview_clock: FrameClock,
    run_tick: TickRegistration,
    preview_tick: TickRegistration,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a live run and register its tick
    pub fn attach_run<S: FrameScheduler + ?Sized>(&mut self, run: RunContext, scheduler: &mut S) {
        self.run = Some(run);
        self.run_clock.reset();
        self.run_tick.register(scheduler);
    }

    /// Re-register a stopped run's tick; no-op while it is active
    pub fn resume_run<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.run.is_some() && !self.run_tick.is_active() {
            self.run_clock.reset();
            self.run_tick.register(scheduler);
        }
    }

    /// Preview `level`, replacing any preview already running
    pub fn start_preview<S: FrameScheduler + ?Sized>(
        &mut self,
        level: &Level,
        ground_y: f32,
        scheduler: &mut S,
    ) {
        self.preview = Some(PreviewContext::new(level, ground_y));
        self.preview_clock.reset();
        self.preview_tick.register(scheduler);
    }

    /// Advance the live run for a host frame at `now_ms`
    ///
    /// A run whose tick was released by `stop_run` stays frozen.
    pub fn run_frame(&mut self, now_ms: f64) -> Vec<RunEvent> {
        if !self.run_tick.is_active() {
            return Vec::new();
        }
        let dt = self.run_clock.delta(now_ms);
        match self.run.as_mut() {
            Some(run) => {
                tick(run, dt);
                run.take_events()
            }
            None => Vec::new(),
        }
    }

    /// Advance the preview for a host frame at `now_ms`
    pub fn preview_frame(&mut self, now_ms: f64) {
        let dt = self.preview_clock.delta(now_ms);
        if let Some(preview) = self.preview.as_mut() {
            preview_tick(preview, dt);
        }
    }

    /// Advance every active context on one shared host frame
    pub fn frame(&mut self, now_ms: f64) -> Vec<RunEvent> {
        self.preview_frame(now_ms);
        self.run_frame(now_ms)
    }

    /// Release the preview's tick and drop its state
    pub fn stop_preview<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.preview_tick.cancel(scheduler) {
            log::info!("Preview stopped");
        }
        self.preview = None;
    }

    /// Release the live run's tick; safe to call repeatedly
    pub fn stop_run<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.run_tick.cancel(scheduler) {
            log::info!("Run loop stopped");
        }
    }

    pub fn run_active(&self) -> bool {
        self.run_tick.is_active()
    }

    pub fn preview_active(&self) -> bool {
        self.preview_tick.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::sim::{RunPhase, sample_levels};

    #[derive(Default)]
    struct CountingScheduler {
        next: u32,
        live: Vec<FrameHandle>,
        cancels: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            let h = FrameHandle(self.next);
            self.live.push(h);
            h
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancels += 1;
            self.live.retain(|h| *h != handle);
        }
    }

    #[test]
    fn clock_clamps_and_starts_at_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.delta(3000.0), MAX_FRAME_DT);
        clock.reset();
        assert_eq!(clock.delta(5000.0), 0.0);
    }

    #[test]
    fn stop_run_cancels_once() {
        let mut sched = CountingScheduler::default();
        let mut driver = FrameDriver::new();
        driver.attach_run(RunContext::new(480.0, 1), &mut sched);
        assert!(driver.run_active());
        driver.stop_run(&mut sched);
        driver.stop_run(&mut sched);
        assert_eq!(sched.cancels, 1);
        assert!(sched.live.is_empty());
        assert!(!driver.run_active());
    }

    #[test]
    fn stopped_run_no_longer_advances() {
        let mut sched = CountingScheduler::default();
        let mut driver = FrameDriver::new();
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&sample_levels()[0]);
        driver.attach_run(run, &mut sched);
        driver.frame(0.0);
        driver.frame(16.0);
        let moved = driver.run.as_ref().map(|r| r.distance()).unwrap();
        assert!(moved > 0.0);

        driver.stop_run(&mut sched);
        assert!(driver.frame(32.0).is_empty());
        driver.frame(48.0);
        assert_eq!(driver.run.as_ref().map(|r| r.distance()), Some(moved));

        driver.resume_run(&mut sched);
        driver.resume_run(&mut sched);
        assert_eq!(sched.live.len(), 1);
        driver.frame(64.0);
        driver.frame(80.0);
        assert!(driver.run.as_ref().map(|r| r.distance()).unwrap() > moved);
    }

    #[test]
    fn stop_preview_releases_tick_and_state() {
        let mut sched = CountingScheduler::default();
        let mut driver = FrameDriver::new();
        let level = &sample_levels()[0];
        driver.start_preview(level, 300.0, &mut sched);
        // Restarting the preview swaps the registration
        driver.start_preview(level, 300.0, &mut sched);
        assert_eq!(sched.live.len(), 1);
        assert_eq!(sched.cancels, 1);

        driver.stop_preview(&mut sched);
        assert!(driver.preview.is_none());
        assert!(sched.live.is_empty());
        // Idempotent, frame after stop is harmless
        driver.stop_preview(&mut sched);
        driver.preview_frame(16.0);
        assert_eq!(sched.cancels, 2);
    }

    #[test]
    fn run_and_preview_advance_independently() {
        let mut sched = CountingScheduler::default();
        let mut driver = FrameDriver::new();
        let levels = sample_levels();
        let mut run = RunContext::new(480.0, 1);
        run.start_level(&levels[0]);
        driver.attach_run(run, &mut sched);
        driver.start_preview(&levels[1], 300.0, &mut sched);

        let mut t = 0.0;
        for _ in 0..30 {
            driver.frame(t);
            t += 16.0;
        }
        let run = driver.run.as_ref().unwrap();
        let preview = driver.preview.as_ref().unwrap();
        assert_eq!(run.phase, RunPhase::Running);
        assert!(run.distance() > preview.distance());
        assert!(preview.distance() > 0.0);
    }
}
