//! RGBA colors for overlay primitives.
//!
//! Analog palette: greys for wash and noise, red/cyan for chroma fringes,
//! status colors for the camcorder OSD.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Pure red (tape-head chroma fringe, REC lamp).
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    /// Pure cyan (opposite chroma fringe).
    pub const CYAN: Self = Self::rgba(0.0, 1.0, 1.0, 1.0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    /// Pure green (battery full).
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 1.0);
    /// Pure yellow (battery half).
    pub const YELLOW: Self = Self::rgba(1.0, 1.0, 0.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a neutral grey of the given level and alpha.
    #[must_use]
    pub const fn grey(level: f32, a: f32) -> Self {
        Self::rgba(level, level, level, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
