//! # Public Control Surface
//!
//! [`VcrEffect`] owns the effect state and borrows nothing global: the
//! configuration store and wall clock are injected, and the draw surface is
//! passed per frame.

use vcrfx_draw::ImmediateDraw;

use crate::clock::{LocalClock, WallClock};
use crate::compositor::{self, FrameReport};
use crate::config::{self, CvarStore, FrameConfig, VCR_ENABLED, VCR_MODE, VCR_QUALITY};
use crate::layers::Viewport;
use crate::mode::EffectMode;
use crate::preset::Quality;
use crate::state::EffectState;

/// Seed used at init. Fixed so that replays are reproducible.
pub const INIT_SEED: u32 = 0x1234_5678;

/// The VCR / CCTV overlay.
pub struct VcrEffect<S: CvarStore, K: WallClock = LocalClock> {
    cvars: S,
    clock: K,
    state: EffectState,
}

impl<S: CvarStore> VcrEffect<S, LocalClock> {
    /// Creates an uninitialized effect reading the system clock.
    pub fn new(cvars: S) -> Self {
        Self::with_clock(cvars, LocalClock)
    }
}

impl<S: CvarStore, K: WallClock> VcrEffect<S, K> {
    /// Creates an uninitialized effect with a specific clock.
    pub fn with_clock(cvars: S, clock: K) -> Self {
        Self {
            cvars,
            clock,
            state: EffectState::default(),
        }
    }

    /// Resets all state and registers configuration variables.
    ///
    /// Safe to call again; variables that already exist keep their values.
    pub fn init(&mut self) {
        self.state = EffectState::new(INIT_SEED);
        config::register_defaults(&mut self.cvars);
        tracing::info!(
            "VCR effect initialized (mode {:?}). Set {} 1 for CCTV.",
            self.mode(),
            VCR_MODE
        );
    }

    /// Marks the effect uninitialized. Later draw calls do nothing.
    pub fn shutdown(&mut self) {
        if self.state.initialized {
            tracing::info!("VCR effect shut down after {} frames", self.state.frame_count);
        }
        self.state.initialized = false;
    }

    /// Whether init has run without a later shutdown.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    /// Draws one frame. Does nothing unless initialized and enabled.
    pub fn draw<D: ImmediateDraw + ?Sized>(
        &mut self,
        draw: &mut D,
        width: u32,
        height: u32,
        time: f32,
    ) -> FrameReport {
        if !self.state.initialized {
            return FrameReport::skipped();
        }
        let config = FrameConfig::read(&self.cvars);
        if !config.enabled {
            return FrameReport::skipped();
        }
        compositor::compose(
            draw,
            &mut self.state,
            &config,
            &self.clock,
            Viewport::new(width, height),
            time,
        )
    }

    /// Turns the effect on.
    pub fn enable(&mut self) {
        self.cvars.set_value(VCR_ENABLED, 1.0);
    }

    /// Turns the effect off.
    pub fn disable(&mut self) {
        self.cvars.set_value(VCR_ENABLED, 0.0);
    }

    /// Flips the enable flag.
    pub fn toggle(&mut self) {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
    }

    /// Whether the enable variable is set.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.cvars.integer(VCR_ENABLED).unwrap_or(0) != 0
    }

    /// Restarts the 50 s cycle and drops pending forced triggers.
    pub fn reset(&mut self) {
        self.state.reset_timing();
    }

    /// Selects a mode, clamped to 0-3.
    pub fn set_mode(&mut self, mode: i32) {
        let mode = EffectMode::from_index(mode);
        self.cvars.set_value(VCR_MODE, mode.index() as f32);
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> EffectMode {
        EffectMode::from_index(self.cvars.integer(VCR_MODE).unwrap_or(0))
    }

    /// Selects a quality level, clamped to 0-2.
    pub fn set_quality(&mut self, level: i32) {
        let quality = Quality::from_level(level);
        self.cvars.set_value(VCR_QUALITY, quality.level() as f32);
    }

    /// Current quality level.
    #[must_use]
    pub fn quality(&self) -> Quality {
        Quality::from_level(self.cvars.integer(VCR_QUALITY).unwrap_or(0))
    }

    /// Sets the battery charge, clamped to 0-1.
    pub fn set_battery(&mut self, level: f32) {
        self.state.battery_level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
    }

    /// Battery charge (0-1).
    #[must_use]
    pub fn battery(&self) -> f32 {
        self.state.battery_level
    }

    /// Starts a distortion spike on the next frame.
    pub fn force_distortion(&mut self) {
        self.state.force_distortion = true;
    }

    /// Starts a CCTV moment on the next frame.
    pub fn force_cctv(&mut self) {
        self.state.force_cctv = true;
    }

    /// Starts a static burst on the next frame.
    pub fn force_static(&mut self) {
        self.state.force_static = true;
    }

    /// Starts tape damage on the next frame.
    pub fn force_tape_damage(&mut self) {
        self.state.force_tape_damage = true;
    }

    /// Effect state, for inspection.
    #[must_use]
    pub fn state(&self) -> &EffectState {
        &self.state
    }

    /// Mutable effect state.
    ///
    /// Lets tests and tools position the timeline directly.
    pub fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }

    /// The configuration store.
    #[must_use]
    pub fn cvars(&self) -> &S {
        &self.cvars
    }

    /// Mutable configuration store.
    pub fn cvars_mut(&mut self) -> &mut S {
        &mut self.cvars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, OsdTime};
    use crate::config::MemoryCvars;
    use vcrfx_draw::RecordingCanvas;

    fn effect() -> VcrEffect<MemoryCvars, FixedClock> {
        let mut effect =
            VcrEffect::with_clock(MemoryCvars::new(), FixedClock(OsdTime::new(1, 2, 3, 4, 5)));
        effect.init();
        effect
    }

    #[test]
    fn test_draw_before_init_is_noop() {
        let mut effect = VcrEffect::with_clock(MemoryCvars::with_defaults(), FixedClock(OsdTime::new(1, 1, 0, 0, 0)));
        let mut canvas = RecordingCanvas::new();
        let report = effect.draw(&mut canvas, 640, 480, 1.0);
        assert!(!report.drawn);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_disabled_draws_nothing() {
        let mut effect = effect();
        effect.disable();
        let mut canvas = RecordingCanvas::new();
        assert!(!effect.draw(&mut canvas, 640, 480, 1.0).drawn);
        assert!(canvas.commands().is_empty());
        assert!(canvas.is_balanced());
    }

    #[test]
    fn test_shutdown_stops_drawing() {
        let mut effect = effect();
        effect.shutdown();
        assert!(!effect.is_initialized());
        let mut canvas = RecordingCanvas::new();
        assert!(!effect.draw(&mut canvas, 640, 480, 1.0).drawn);
    }

    #[test]
    fn test_state_mut_positions_cycle() {
        let mut effect = effect();
        effect.state_mut().effect_start_time = 100.0;
        let mut canvas = RecordingCanvas::new();
        let report = effect.draw(&mut canvas, 640, 480, 121.0);
        assert_eq!(report.params.loop_time, 21.0);
        assert_eq!(report.params.jitter, 1.0);
    }

    #[test]
    fn test_battery_nan_reads_empty() {
        let mut effect = effect();
        effect.set_battery(f32::NAN);
        assert_eq!(effect.battery(), 0.0);
    }

    #[test]
    fn test_init_keeps_archived_settings() {
        let mut effect = effect();
        effect.set_mode(2);
        effect.init();
        assert_eq!(effect.mode(), EffectMode::FoundFootage);
    }
}
