//! # Draw Layers
//!
//! Each layer is a free function of (draw surface, viewport, RNG, params)
//! that issues flat-colored geometry. Layers keep no state of their own;
//! the only persistent positions (tracking band, damage bands) live in
//! [`crate::EffectState`] and are passed in.
//!
//! Every layer:
//! - returns early, issuing nothing, when its no-op guard trips
//! - emits its debug marker only after the guard passes
//! - leaves the blend mode at [`BlendMode::Alpha`](vcrfx_draw::BlendMode::Alpha)

pub mod cctv;
pub mod noise;
pub mod osd;
pub mod tape;
pub mod wash;

pub use cctv::cctv_overlay;
pub use noise::{film_grain, noise_dots, scanlines, static_burst};
pub use osd::{battery_gauge, debug_bar, digit, rec_indicator, timestamp};
pub use tape::{apply_jitter, tape_damage, tracking_band};
pub use wash::{chromatic_aberration, color_separation, desaturation, flicker, night_vision};

use vcrfx_draw::Rect;

/// Debug marker labels, one per layer.
pub mod marker {
    /// Desaturation wash.
    pub const DESATURATION: &str = "vcr.desaturation";
    /// Film grain.
    pub const GRAIN: &str = "vcr.grain";
    /// Noise dots.
    pub const NOISE_DOTS: &str = "vcr.noise_dots";
    /// Scanlines.
    pub const SCANLINES: &str = "vcr.scanlines";
    /// Tracking band.
    pub const TRACKING: &str = "vcr.tracking";
    /// Screen jitter.
    pub const JITTER: &str = "vcr.jitter";
    /// CCTV flicker.
    pub const FLICKER: &str = "vcr.flicker";
    /// Distortion color separation.
    pub const COLOR_SEPARATION: &str = "vcr.color_separation";
    /// Chromatic aberration.
    pub const CHROMATIC_ABERRATION: &str = "vcr.chromatic_aberration";
    /// CCTV darkening and vignette.
    pub const CCTV: &str = "vcr.cctv";
    /// Night vision tint.
    pub const NIGHT_VISION: &str = "vcr.night_vision";
    /// REC indicator.
    pub const REC: &str = "vcr.rec";
    /// Timestamp OSD.
    pub const TIMESTAMP: &str = "vcr.timestamp";
    /// Battery gauge.
    pub const BATTERY: &str = "vcr.battery";
    /// Static burst.
    pub const STATIC: &str = "vcr.static";
    /// Tape damage.
    pub const TAPE_DAMAGE: &str = "vcr.tape_damage";
    /// Debug progress bar.
    pub const DEBUG: &str = "vcr.debug";
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as float.
    #[inline]
    #[must_use]
    pub fn w(self) -> f32 {
        self.width as f32
    }

    /// Height as float.
    #[inline]
    #[must_use]
    pub fn h(self) -> f32 {
        self.height as f32
    }

    /// Pixel count.
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.width.saturating_mul(self.height)
    }

    /// The whole viewport.
    #[must_use]
    pub fn rect(self) -> Rect {
        Rect::screen(self.w(), self.h())
    }

    /// Full-width band of `height` starting at `y`, shifted by `x`.
    #[must_use]
    pub fn band(self, x: f32, y: f32, height: f32) -> Rect {
        Rect::band(x, y, self.w(), height)
    }
}
