//! Quality presets.
//!
//! Three fixed bundles trading overlay density for fill-rate. The active
//! preset is picked every frame from the clamped `vcr_quality` value.

/// Quality level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Quality {
    /// Minimal effects for very old GPUs.
    Low = 0,
    /// Balanced.
    Medium = 1,
    /// Full effect.
    #[default]
    High = 2,
}

impl Quality {
    /// Clamps an arbitrary integer into a quality level.
    #[must_use]
    pub const fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Numeric level (0-2).
    #[must_use]
    pub const fn level(self) -> i32 {
        self as i32
    }

    /// The preset for this level.
    #[must_use]
    pub const fn preset(self) -> &'static QualityPreset {
        &QualityPreset::TABLE[self as usize]
    }
}

/// Density multipliers and feature flags for one quality level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPreset {
    /// Multiplier on every noise-dot count.
    pub noise_mult: f32,
    /// Multiplier on film-grain density.
    pub grain_mult: f32,
    /// Scanline stride in pixels.
    pub scanline_skip: u32,
    /// CCTV vignette cell size in pixels.
    pub vignette_step: u32,
    /// Tracking-line sweep suggested. Advisory; `vcr_tracking_lines` decides.
    pub tracking: bool,
    /// Chroma split on jitter and distortion.
    pub color_shift: bool,
    /// CCTV brightness flicker.
    pub flicker: bool,
    /// REC indicator allowed.
    pub rec_indicator: bool,
    /// Timestamp OSD suggested. Advisory; `vcr_timestamp` decides.
    pub timestamp: bool,
    /// Random static bursts allowed.
    pub static_bursts: bool,
}

impl QualityPreset {
    /// Low preset.
    pub const LOW: Self = Self {
        noise_mult: 0.25,
        grain_mult: 0.0,
        scanline_skip: 4,
        vignette_step: 40,
        tracking: false,
        color_shift: false,
        flicker: false,
        rec_indicator: true,
        timestamp: false,
        static_bursts: false,
    };

    /// Medium preset.
    pub const MEDIUM: Self = Self {
        noise_mult: 0.6,
        grain_mult: 0.5,
        scanline_skip: 2,
        vignette_step: 30,
        tracking: true,
        color_shift: true,
        flicker: false,
        rec_indicator: true,
        timestamp: true,
        static_bursts: true,
    };

    /// High preset.
    pub const HIGH: Self = Self {
        noise_mult: 1.0,
        grain_mult: 1.0,
        scanline_skip: 2,
        vignette_step: 20,
        tracking: true,
        color_shift: true,
        flicker: true,
        rec_indicator: true,
        timestamp: true,
        static_bursts: true,
    };

    /// Indexed by [`Quality`].
    pub const TABLE: [Self; 3] = [Self::LOW, Self::MEDIUM, Self::HIGH];
}
