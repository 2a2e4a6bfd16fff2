//! Effect modes.

/// What kind of recording the overlay imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EffectMode {
    /// Consumer VCR tape: REC lamp, battery, timestamp.
    #[default]
    Vcr = 0,
    /// Security camera: vignette, flicker, scanlines, timestamp.
    Cctv = 1,
    /// Handheld camcorder with random tape faults.
    FoundFootage = 2,
    /// Green-phosphor night vision.
    NightVision = 3,
}

impl EffectMode {
    /// Clamps an arbitrary integer into a mode.
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Self::Vcr,
            1 => Self::Cctv,
            2 => Self::FoundFootage,
            _ => Self::NightVision,
        }
    }

    /// Numeric index (0-3).
    #[must_use]
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Whether the camcorder OSD (REC lamp and battery) is shown.
    #[must_use]
    pub const fn has_camcorder_osd(self) -> bool {
        matches!(self, Self::Vcr | Self::FoundFootage)
    }

    /// Whether the date/time OSD is shown.
    #[must_use]
    pub const fn has_timestamp(self) -> bool {
        !matches!(self, Self::NightVision)
    }

    /// Whether tape faults start on their own.
    #[must_use]
    pub const fn rolls_faults(self) -> bool {
        matches!(self, Self::FoundFootage)
    }
}
