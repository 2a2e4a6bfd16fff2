//! # Frame Compositor
//!
//! Enters 2D overlay mode, runs the sequencer, draws the active layers in a
//! fixed order and restores the host's graphics state.
//!
//! ## Layer Order
//!
//! ```text
//! jitter → desaturation → grain → noise dots → tracking band
//!        → mode step (REC + battery | CCTV + scanlines | night vision)
//!        → faults (CCTV moment, static, tape damage)
//!        → timestamp → color separation → chromatic aberration → debug bar
//! ```
//!
//! State entry is an RAII guard, so every push is popped on every path.

use std::ops::{Deref, DerefMut};

use vcrfx_draw::{Color, ImmediateDraw, MatrixStack};

use crate::clock::WallClock;
use crate::config::FrameConfig;
use crate::layers::{self, Viewport};
use crate::mode::EffectMode;
use crate::state::EffectState;
use crate::timeline::{self, FrameParams, SPIKE_JITTER_MAX, STATIC_INTENSITY};

/// Layers a frame can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Layer {
    /// Screen jitter transform.
    Jitter,
    /// Desaturation wash.
    Desaturation,
    /// Film grain.
    Grain,
    /// Noise dots.
    NoiseDots,
    /// Tracking band.
    Tracking,
    /// REC indicator.
    RecIndicator,
    /// Battery gauge.
    Battery,
    /// CCTV overlay.
    Cctv,
    /// Scanlines.
    Scanlines,
    /// Night vision tint.
    NightVision,
    /// Static burst.
    StaticBurst,
    /// Tape damage.
    TapeDamage,
    /// Timestamp OSD.
    Timestamp,
    /// Distortion color separation.
    ColorSeparation,
    /// Chromatic aberration.
    ChromaticAberration,
    /// Debug progress bar.
    DebugBar,
}

impl Layer {
    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Set of layers, as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerSet(u32);

impl LayerSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Adds a layer.
    #[inline]
    pub fn insert(&mut self, layer: Layer) {
        self.0 |= layer.bit();
    }

    /// Adds a layer if `drawn` is true.
    #[inline]
    pub fn insert_if(&mut self, layer: Layer, drawn: bool) {
        if drawn {
            self.insert(layer);
        }
    }

    /// Returns true if the layer is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Number of layers in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if no layer is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Result of one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Whether the overlay ran at all.
    pub drawn: bool,
    /// Sequencer output for the frame.
    pub params: FrameParams,
    /// Layers that issued geometry.
    pub layers: LayerSet,
}

impl FrameReport {
    /// Report for a frame where the effect was off.
    #[must_use]
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Overlay mode guard.
///
/// Saves attribute state and both matrices, loads a pixel ortho projection
/// and disables depth, culling, texturing and lighting. Dropping the guard
/// restores everything and leaves white color with no texture bound.
pub struct OverlayPass<'a, D: ImmediateDraw + ?Sized> {
    draw: &'a mut D,
}

impl<'a, D: ImmediateDraw + ?Sized> OverlayPass<'a, D> {
    /// Enters overlay mode for a `view`-sized target.
    pub fn begin(draw: &'a mut D, view: Viewport) -> Self {
        draw.push_state();
        draw.push_matrix(MatrixStack::Projection);
        draw.push_matrix(MatrixStack::ModelView);
        draw.load_ortho(view.w(), view.h());
        draw.prepare_overlay();
        Self { draw }
    }
}

impl<D: ImmediateDraw + ?Sized> Deref for OverlayPass<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.draw
    }
}

impl<D: ImmediateDraw + ?Sized> DerefMut for OverlayPass<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.draw
    }
}

impl<D: ImmediateDraw + ?Sized> Drop for OverlayPass<'_, D> {
    fn drop(&mut self) {
        self.draw.pop_matrix(MatrixStack::ModelView);
        self.draw.pop_matrix(MatrixStack::Projection);
        self.draw.set_color(Color::WHITE);
        self.draw.bind_texture(None);
        self.draw.pop_state();
    }
}

/// Draws one overlay frame.
pub fn compose<D, K>(
    draw: &mut D,
    state: &mut EffectState,
    config: &FrameConfig,
    clock: &K,
    view: Viewport,
    time: f32,
) -> FrameReport
where
    D: ImmediateDraw + ?Sized,
    K: WallClock + ?Sized,
{
    let preset = config.quality.preset();
    state.width = view.width;
    state.height = view.height;

    let mut pass = OverlayPass::begin(draw, view);
    let params = timeline::advance(state, config, preset, time, view.h());
    let mut layers = LayerSet::EMPTY;

    if params.jitter > 0.0 {
        layers::apply_jitter(&mut *pass, &mut state.rng, SPIKE_JITTER_MAX * params.jitter);
        layers.insert(Layer::Jitter);
    }

    let desaturated =
        layers::desaturation(&mut *pass, view, params.desaturation, layers::wash::SEPIA_TINT);
    layers.insert_if(Layer::Desaturation, desaturated);

    let grained = layers::film_grain(
        &mut *pass,
        view,
        &mut state.rng,
        params.grain_alpha * config.grain_intensity,
        preset.grain_mult * 0.5,
    );
    layers.insert_if(Layer::Grain, grained);

    let dots = (params.dots as f32 * preset.noise_mult * config.noise_dots) as i32;
    let dotted = layers::noise_dots(&mut *pass, view, &mut state.rng, dots, 0.5);
    layers.insert_if(Layer::NoiseDots, dotted);

    if params.show_tracking && config.tracking_lines {
        layers::tracking_band(&mut *pass, view, state.tracking_line_y);
        layers.insert(Layer::Tracking);
    }

    match config.mode {
        EffectMode::Vcr | EffectMode::FoundFootage => {
            if preset.rec_indicator && config.rec_indicator {
                layers::rec_indicator(&mut *pass, time);
                layers.insert(Layer::RecIndicator);
            }
            layers::battery_gauge(&mut *pass, view, state.battery_level, time);
            layers.insert(Layer::Battery);
        }
        EffectMode::Cctv => {
            let intensity = if params.cctv_moment { 1.0 } else { 0.5 };
            layers::cctv_overlay(&mut *pass, view, &mut state.rng, preset, intensity, time);
            layers.insert(Layer::Cctv);

            let alpha = layers::noise::SCANLINE_ALPHA * config.scanline_alpha;
            layers::scanlines(&mut *pass, view, alpha, preset.scanline_skip);
            layers.insert(Layer::Scanlines);
        }
        EffectMode::NightVision => {
            layers::night_vision(&mut *pass, view);
            let extra = (layers::wash::NIGHT_VISION_NOISE * preset.noise_mult) as i32;
            layers::noise_dots(&mut *pass, view, &mut state.rng, extra, 0.5);
            layers.insert(Layer::NightVision);
        }
    }

    if params.cctv_moment && config.mode != EffectMode::Cctv {
        layers::cctv_overlay(&mut *pass, view, &mut state.rng, preset, 1.0, time);
        layers.insert(Layer::Cctv);
    }
    if params.static_burst {
        layers::static_burst(&mut *pass, view, &mut state.rng, STATIC_INTENSITY);
        layers.insert(Layer::StaticBurst);
    }
    if params.tape_damage {
        layers::tape_damage(
            &mut *pass,
            view,
            &mut state.rng,
            &mut state.damage_line_y,
            1.0,
            params.dt,
        );
        layers.insert(Layer::TapeDamage);
    }

    if config.timestamp && config.mode.has_timestamp() {
        layers::timestamp(&mut *pass, view, clock.now());
        layers.insert(Layer::Timestamp);
    }

    if params.distortion && preset.color_shift {
        layers::color_separation(&mut *pass, view, 1.0);
        layers.insert(Layer::ColorSeparation);
    }
    if params.jitter > 0.0 && preset.color_shift {
        layers::chromatic_aberration(&mut *pass, view, params.jitter);
        layers.insert(Layer::ChromaticAberration);
    }

    if config.debug {
        layers::debug_bar(&mut *pass, view, params.loop_time);
        layers.insert(Layer::DebugBar);
        tracing::trace!(
            frame = state.frame_count,
            loop_time = params.loop_time,
            desaturation = params.desaturation,
            dots,
            jitter = params.jitter,
            layers = layers.len(),
            idle_events = timeline::idle_marks(state),
            "vcr frame"
        );
    }

    drop(pass);

    FrameReport {
        drawn: true,
        params,
        layers,
    }
}
