//! Blend modes used by the overlay layers.
//!
//! The overlay never reads the framebuffer, so every perceptual effect is a
//! blend equation against whatever the scene left behind:
//!
//! ```text
//! Alpha:     src * src.a        + dst * (1 - src.a)   (tints, bands, dots)
//! Multiply:  src * 0            + dst * src           (darkening, green tint)
//! Additive:  src * src.a        + dst * 1             (glow)
//! ```

/// Blend mode for overlay primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Classic alpha blending (`SRC_ALPHA`, `ONE_MINUS_SRC_ALPHA`).
    #[default]
    Alpha,
    /// Multiplicative blending (`DST_COLOR`, `ZERO`).
    ///
    /// Scales the destination by the source color without a texture read.
    Multiply,
    /// Additive blending (`SRC_ALPHA`, `ONE`).
    Additive,
}

impl BlendMode {
    /// Returns the blend factors for this mode.
    #[must_use]
    pub const fn blend_state(self) -> BlendStateConfig {
        match self {
            Self::Alpha => BlendStateConfig {
                src: BlendFactor::SrcAlpha,
                dst: BlendFactor::OneMinusSrcAlpha,
            },
            Self::Multiply => BlendStateConfig {
                src: BlendFactor::DstColor,
                dst: BlendFactor::Zero,
            },
            Self::Additive => BlendStateConfig {
                src: BlendFactor::SrcAlpha,
                dst: BlendFactor::One,
            },
        }
    }
}

/// Blend factor (mirrors the fixed-function names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// src.a
    SrcAlpha,
    /// 1 - src.a
    OneMinusSrcAlpha,
    /// dst.rgba
    DstColor,
}

/// Source/destination factor pair for an additive blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendStateConfig {
    /// Source factor.
    pub src: BlendFactor,
    /// Destination factor.
    pub dst: BlendFactor,
}
