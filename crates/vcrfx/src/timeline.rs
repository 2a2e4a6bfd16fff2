//! # Timeline Sequencer
//!
//! Derives this frame's overlay parameters from the time since the effect
//! started, wrapped into a 50 second cycle:
//!
//! ```text
//! loop  0s        10s       20s  22s  30s  32s  40s  42s        50s
//!       |---------|=========|====|====|====|----|====|----------|
//!                 tracking sweep [10,30)
//!                           shake [20,22)
//!                                     dots +100 [30,32)
//!                                               desat spike [40,42)
//! ```
//!
//! Windows are evaluated independently. On top of the cycle, timed events
//! (distortion spike, CCTV moment, static burst, tape damage, frame drop)
//! run for a fixed duration from their timing mark. Forced triggers are
//! consumed here: the flag stamps its mark with the current time and is
//! cleared on the same frame.

use std::ops::Range;

use crate::config::FrameConfig;
use crate::preset::QualityPreset;
use crate::state::{EffectState, NOT_STARTED, TRACKING_START_Y};

/// Length of one sequencing cycle (seconds).
pub const LOOP_SECONDS: f32 = 50.0;

/// Tracking-line sweep window.
pub const TRACKING_WINDOW: Range<f32> = 10.0..30.0;
/// Screen-shake window.
pub const SHAKE_WINDOW: Range<f32> = 20.0..22.0;
/// Noise-burst window.
pub const NOISE_BURST_WINDOW: Range<f32> = 30.0..32.0;
/// Desaturation-spike window.
pub const DESATURATION_WINDOW: Range<f32> = 40.0..42.0;

/// Desaturation outside every window.
pub const BASELINE_DESATURATION: f32 = 0.08;
/// Desaturation inside the desaturation-spike window.
pub const DESATURATION_SPIKE: f32 = 0.50;
/// Noise dots outside every window.
pub const BASELINE_DOTS: i32 = 20;
/// Extra dots during the noise burst.
pub const NOISE_BURST_DOTS: i32 = 100;
/// Grain alpha outside spikes.
pub const NORMAL_GRAIN: f32 = 0.04;

/// Height of the tracking band (pixels).
pub const TRACKING_LINE_HEIGHT: f32 = 8.0;
/// How far past the bottom edge the band keeps moving before it hides.
pub const TRACKING_OVERRUN: f32 = 200.0;
/// Parking offset below the viewport outside the window.
pub const TRACKING_PARK_OFFSET: f32 = 500.0;

/// Step used on the first frame after (re)start.
pub const NOMINAL_DT: f32 = 0.016;
/// Largest step a single frame may advance animations by.
pub const MAX_DT: f32 = 0.1;

/// Desaturation during a distortion spike.
pub const SPIKE_DESATURATION: f32 = 1.0;
/// Minimum dot count during a distortion spike.
pub const SPIKE_NOISE_DOTS: i32 = 40;
/// Grain alpha during a distortion spike.
pub const SPIKE_GRAIN: f32 = 0.2;
/// Jitter amplitude at full intensity (pixels).
pub const SPIKE_JITTER_MAX: f32 = 5.0;

/// CCTV moment length (seconds).
pub const CCTV_DURATION: f32 = 2.5;
/// Per-frame chance of a static burst.
pub const STATIC_CHANCE: f32 = 0.02;
/// Static burst length (seconds).
pub const STATIC_DURATION: f32 = 0.15;
/// Static burst intensity.
pub const STATIC_INTENSITY: f32 = 0.8;
/// Per-frame chance of tape damage.
pub const TAPE_DAMAGE_CHANCE: f32 = 0.01;
/// Tape damage length (seconds).
pub const TAPE_DAMAGE_DURATION: f32 = 0.3;
/// Per-frame chance of a frame drop.
pub const FRAME_DROP_CHANCE: f32 = 0.005;
/// Frame drop length (seconds).
pub const FRAME_DROP_DURATION: f32 = 0.1;

/// Parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameParams {
    /// Time since start, modulo [`LOOP_SECONDS`].
    pub loop_time: f32,
    /// Animation step for this frame.
    pub dt: f32,
    /// Desaturation wash intensity.
    pub desaturation: f32,
    /// Noise dots before multipliers.
    pub dots: i32,
    /// Jitter intensity (0-1).
    pub jitter: f32,
    /// Grain alpha before the tunable multiplier.
    pub grain_alpha: f32,
    /// Tracking band is on screen and advancing.
    pub show_tracking: bool,
    /// Tracking band position.
    pub tracking_line_y: f32,
    /// Distortion spike active.
    pub distortion: bool,
    /// CCTV moment active.
    pub cctv_moment: bool,
    /// Static burst active.
    pub static_burst: bool,
    /// Tape damage active.
    pub tape_damage: bool,
    /// Frame drop active (random patterns frozen).
    pub frame_drop: bool,
}

/// Whether an event stamped at `mark` is still running at `now`.
#[inline]
#[must_use]
pub fn is_active(mark: f32, duration: f32, now: f32) -> bool {
    mark >= 0.0 && now >= mark && now - mark < duration
}

/// Runs the sequencer for one frame and reseeds the RNG.
///
/// `height` is the viewport height in pixels.
pub fn advance(
    state: &mut EffectState,
    config: &FrameConfig,
    preset: &QualityPreset,
    time: f32,
    height: f32,
) -> FrameParams {
    let first_frame = !state.is_running();
    if first_frame {
        state.effect_start_time = time;
        state.tracking_line_y = TRACKING_START_Y;
        state.in_tracking_window = false;
    }

    let dt = if first_frame || state.previous_time < 0.0 {
        NOMINAL_DT
    } else {
        (time - state.previous_time).clamp(0.0, MAX_DT)
    };
    state.previous_time = time;
    state.current_time = time;

    let elapsed = time - state.effect_start_time;
    let loop_time = elapsed.rem_euclid(LOOP_SECONDS);

    let mut params = FrameParams {
        loop_time,
        dt,
        desaturation: BASELINE_DESATURATION,
        dots: BASELINE_DOTS,
        jitter: 0.0,
        grain_alpha: NORMAL_GRAIN,
        ..FrameParams::default()
    };

    params.show_tracking = sweep_tracking_line(state, loop_time, height, dt);
    params.tracking_line_y = state.tracking_line_y;

    if SHAKE_WINDOW.contains(&loop_time) {
        params.jitter = 1.0;
    }
    if NOISE_BURST_WINDOW.contains(&loop_time) {
        params.dots += NOISE_BURST_DOTS;
    }
    if DESATURATION_WINDOW.contains(&loop_time) {
        params.desaturation = DESATURATION_SPIKE;
    }

    let frame_drop_started = start_events(state, config, preset, time);

    params.distortion = is_active(state.last_distort_time, config.distortion_duration, time);
    params.cctv_moment = is_active(state.cctv_start_time, CCTV_DURATION, time);
    params.static_burst = is_active(state.static_start_time, STATIC_DURATION, time);
    params.tape_damage = is_active(state.tape_damage_start, TAPE_DAMAGE_DURATION, time);
    params.frame_drop = is_active(state.frame_drop_start, FRAME_DROP_DURATION, time);

    if params.distortion {
        params.jitter = 1.0;
        params.desaturation = SPIKE_DESATURATION;
        params.dots = params.dots.max(SPIKE_NOISE_DOTS);
        params.grain_alpha = SPIKE_GRAIN;
    }

    state.frame_count = state.frame_count.wrapping_add(1);
    let mut seed = state.rng.state() ^ state.frame_count ^ (time * 1000.0) as u32;
    if frame_drop_started {
        state.frame_drop_seed = seed;
    }
    if params.frame_drop {
        seed = state.frame_drop_seed;
    }
    state.rng.seed(seed);

    params
}

/// Moves the tracking band. Returns whether it is visible this frame.
fn sweep_tracking_line(state: &mut EffectState, loop_time: f32, height: f32, dt: f32) -> bool {
    if !TRACKING_WINDOW.contains(&loop_time) {
        state.tracking_line_y = height + TRACKING_PARK_OFFSET;
        state.in_tracking_window = false;
        return false;
    }

    if !state.in_tracking_window {
        state.in_tracking_window = true;
        state.tracking_line_y = -TRACKING_LINE_HEIGHT;
    }

    if state.tracking_line_y > height + TRACKING_LINE_HEIGHT + TRACKING_OVERRUN {
        return false;
    }

    // One traversal takes about five seconds at any resolution.
    state.tracking_line_y += height / 5.0 * dt;
    true
}

/// Consumes forced triggers and rolls natural events.
///
/// Returns true if a frame drop started this frame.
fn start_events(
    state: &mut EffectState,
    config: &FrameConfig,
    preset: &QualityPreset,
    time: f32,
) -> bool {
    let rolls = config.mode.rolls_faults();

    let spike_due = rolls && config.distortion_interval > 0.0 && {
        let since = if state.last_distort_time >= 0.0 {
            state.last_distort_time
        } else {
            state.effect_start_time
        };
        time - since >= config.distortion_interval
    };
    if std::mem::take(&mut state.force_distortion) || spike_due {
        state.last_distort_time = time;
        tracing::debug!("Distortion spike at {:.2}s (frame {})", time, state.frame_count);
        if state.rng.next_float() < config.cctv_chance {
            state.cctv_start_time = time;
            tracing::debug!("CCTV moment opened by distortion at {:.2}s", time);
        }
    }

    if std::mem::take(&mut state.force_cctv) {
        state.cctv_start_time = time;
        tracing::debug!("CCTV moment at {:.2}s", time);
    }

    let static_running = is_active(state.static_start_time, STATIC_DURATION, time);
    let static_rolled = rolls
        && !static_running
        && preset.static_bursts
        && config.static_bursts
        && state.rng.next_float() < STATIC_CHANCE;
    if std::mem::take(&mut state.force_static) || static_rolled {
        state.static_start_time = time;
        tracing::debug!("Static burst at {:.2}s", time);
    }

    let damage_running = is_active(state.tape_damage_start, TAPE_DAMAGE_DURATION, time);
    let damage_rolled = rolls && !damage_running && state.rng.next_float() < TAPE_DAMAGE_CHANCE;
    if std::mem::take(&mut state.force_tape_damage) || damage_rolled {
        state.tape_damage_start = time;
        tracing::debug!("Tape damage at {:.2}s", time);
    }

    let drop_running = is_active(state.frame_drop_start, FRAME_DROP_DURATION, time);
    if rolls && !drop_running && state.rng.next_float() < FRAME_DROP_CHANCE {
        state.frame_drop_start = time;
        tracing::debug!("Frame drop at {:.2}s", time);
        return true;
    }

    false
}

/// Marks that have never been stamped.
#[must_use]
pub fn idle_marks(state: &EffectState) -> usize {
    [
        state.last_distort_time,
        state.cctv_start_time,
        state.static_start_time,
        state.tape_damage_start,
        state.frame_drop_start,
    ]
    .iter()
    .filter(|&&mark| mark == NOT_STARTED)
    .count()
}
