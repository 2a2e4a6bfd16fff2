//! The effect's single state record.
//!
//! Owned by [`crate::VcrEffect`] and passed by reference into the sequencer
//! and layers. Fixed size: no field grows after construction.

use crate::rng::TapeRng;

/// Timing mark meaning "not started".
pub const NOT_STARTED: f32 = -1.0;

/// Persistent tape-damage band slots.
pub const DAMAGE_LINE_SLOTS: usize = 10;

/// Tracking band position after a (re)start, above the viewport.
pub const TRACKING_START_Y: f32 = -50.0;

/// Battery charge shown after init.
pub const INITIAL_BATTERY: f32 = 0.75;

/// Everything the effect remembers between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectState {
    /// Set by init, cleared by shutdown.
    pub initialized: bool,
    /// Time of the first frame after (re)start.
    pub effect_start_time: f32,
    /// Start of the latest distortion spike.
    pub last_distort_time: f32,
    /// Start of the latest CCTV moment.
    pub cctv_start_time: f32,
    /// Time of the current frame.
    pub current_time: f32,
    /// Start of the latest static burst.
    pub static_start_time: f32,
    /// Start of the latest tape-damage event.
    pub tape_damage_start: f32,
    /// Start of the latest frame drop.
    pub frame_drop_start: f32,
    /// Time of the previous drawn frame.
    pub previous_time: f32,
    /// Battery charge (0-1).
    pub battery_level: f32,
    /// Start a distortion spike on the next frame.
    pub force_distortion: bool,
    /// Start a CCTV moment on the next frame.
    pub force_cctv: bool,
    /// Start a static burst on the next frame.
    pub force_static: bool,
    /// Start tape damage on the next frame.
    pub force_tape_damage: bool,
    /// Frames drawn since (re)start.
    pub frame_count: u32,
    /// Noise generator, reseeded every frame.
    pub rng: TapeRng,
    /// Seed held while a frame drop is active.
    pub frame_drop_seed: u32,
    /// Vertical position of the tracking band.
    pub tracking_line_y: f32,
    /// Whether the previous frame was inside the tracking window.
    pub in_tracking_window: bool,
    /// Vertical positions of the tape-damage bands.
    pub damage_line_y: [f32; DAMAGE_LINE_SLOTS],
    /// Viewport width of the last frame.
    pub width: u32,
    /// Viewport height of the last frame.
    pub height: u32,
}

impl EffectState {
    /// Fresh state, seeded and marked initialized.
    ///
    /// The cycle is anchored at time zero of the host clock; after
    /// [`reset_timing`](Self::reset_timing) it re-anchors on the next frame.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut damage_line_y = [0.0; DAMAGE_LINE_SLOTS];
        for (i, y) in damage_line_y.iter_mut().enumerate() {
            *y = -50.0 - i as f32 * 30.0;
        }

        Self {
            initialized: true,
            effect_start_time: 0.0,
            last_distort_time: NOT_STARTED,
            cctv_start_time: NOT_STARTED,
            current_time: 0.0,
            static_start_time: NOT_STARTED,
            tape_damage_start: NOT_STARTED,
            frame_drop_start: NOT_STARTED,
            previous_time: NOT_STARTED,
            battery_level: INITIAL_BATTERY,
            force_distortion: false,
            force_cctv: false,
            force_static: false,
            force_tape_damage: false,
            frame_count: 0,
            rng: TapeRng::new(seed),
            frame_drop_seed: 0,
            tracking_line_y: TRACKING_START_Y,
            in_tracking_window: false,
            damage_line_y,
            width: 0,
            height: 0,
        }
    }

    /// Reverts every timing mark to "not started" and clears forced triggers.
    ///
    /// The next drawn frame restarts the 50 s cycle.
    pub fn reset_timing(&mut self) {
        self.effect_start_time = NOT_STARTED;
        self.last_distort_time = NOT_STARTED;
        self.cctv_start_time = NOT_STARTED;
        self.static_start_time = NOT_STARTED;
        self.tape_damage_start = NOT_STARTED;
        self.frame_drop_start = NOT_STARTED;
        self.previous_time = NOT_STARTED;
        self.frame_count = 0;
        self.tracking_line_y = TRACKING_START_Y;
        self.in_tracking_window = false;
        self.force_distortion = false;
        self.force_cctv = false;
        self.force_static = false;
        self.force_tape_damage = false;
    }

    /// Whether the cycle has a start time.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.effect_start_time >= 0.0
    }

    /// Whether any forced trigger is pending.
    #[must_use]
    pub const fn has_pending_force(&self) -> bool {
        self.force_distortion || self.force_cctv || self.force_static || self.force_tape_damage
    }
}

impl Default for EffectState {
    fn default() -> Self {
        let mut state = Self::new(0);
        state.initialized = false;
        state
    }
}
