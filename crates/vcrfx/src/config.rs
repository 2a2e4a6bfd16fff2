//! # Configuration Variables
//!
//! The effect never owns its settings. It registers named variables with the
//! host's store at init, then reads a fresh [`FrameConfig`] snapshot every
//! frame. Missing entries read as neutral: flags off, numbers zero.
//!
//! ## Persistence
//!
//! Only entries flagged `archive` survive a restart. Tuning values are
//! deliberately left out so every session starts from the defaults.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::mode::EffectMode;
use crate::preset::Quality;

/// Master enable.
pub const VCR_ENABLED: &str = "vcr_enabled";
/// Quality level (0-2).
pub const VCR_QUALITY: &str = "vcr_quality";
/// Effect mode (0-3).
pub const VCR_MODE: &str = "vcr_mode";
/// REC indicator toggle.
pub const VCR_REC_INDICATOR: &str = "vcr_rec_indicator";
/// Timestamp toggle.
pub const VCR_TIMESTAMP: &str = "vcr_timestamp";
/// Tracking-line toggle.
pub const VCR_TRACKING_LINES: &str = "vcr_tracking_lines";
/// Static-burst toggle.
pub const VCR_STATIC_BURSTS: &str = "vcr_static_bursts";
/// Debug overlay.
pub const VCR_DEBUG: &str = "vcr_debug";
/// Desaturation amount. Registered for hosts; the cycle's levels are fixed.
pub const VCR_DESATURATION: &str = "vcr_desaturation";
/// Noise-dot multiplier.
pub const VCR_NOISE_DOTS: &str = "vcr_noise_dots";
/// Grain alpha multiplier.
pub const VCR_GRAIN_INTENSITY: &str = "vcr_grain_intensity";
/// Scanline alpha multiplier.
pub const VCR_SCANLINE_ALPHA: &str = "vcr_scanline_alpha";
/// Seconds between natural distortion spikes.
pub const VCR_DISTORTION_INTERVAL: &str = "vcr_distortion_interval";
/// Distortion spike length in seconds.
pub const VCR_DISTORTION_DURATION: &str = "vcr_distortion_duration";
/// Probability that a spike opens a CCTV moment.
pub const VCR_CCTV_CHANCE: &str = "vcr_cctv_chance";

/// Persistence flags for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CvarFlags {
    /// Value is written to the archive and restored at startup.
    pub archive: bool,
}

impl CvarFlags {
    /// Not persisted.
    pub const NONE: Self = Self { archive: false };
    /// Persisted across restarts.
    pub const ARCHIVE: Self = Self { archive: true };
}

/// A recognized variable with its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CvarDef {
    /// Variable name.
    pub name: &'static str,
    /// Default value as the host would type it.
    pub default: &'static str,
    /// Persistence flags.
    pub flags: CvarFlags,
    /// One-line description.
    pub description: &'static str,
}

const fn def(
    name: &'static str,
    default: &'static str,
    flags: CvarFlags,
    description: &'static str,
) -> CvarDef {
    CvarDef {
        name,
        default,
        flags,
        description,
    }
}

/// Every variable the effect registers.
pub const CVARS: [CvarDef; 15] = [
    def(VCR_ENABLED, "1", CvarFlags::ARCHIVE, "master enable"),
    def(VCR_QUALITY, "2", CvarFlags::ARCHIVE, "0 low, 1 medium, 2 high"),
    def(VCR_MODE, "0", CvarFlags::ARCHIVE, "0 vcr, 1 cctv, 2 found footage, 3 night vision"),
    def(VCR_REC_INDICATOR, "1", CvarFlags::ARCHIVE, "blinking REC lamp"),
    def(VCR_TIMESTAMP, "1", CvarFlags::ARCHIVE, "date/time OSD"),
    def(VCR_TRACKING_LINES, "1", CvarFlags::ARCHIVE, "tracking-line sweep"),
    def(VCR_STATIC_BURSTS, "1", CvarFlags::ARCHIVE, "random static bursts"),
    def(VCR_DEBUG, "0", CvarFlags::NONE, "loop progress bar and frame tracing"),
    def(VCR_DESATURATION, "0.5", CvarFlags::NONE, "desaturation amount (host tuning only)"),
    def(VCR_NOISE_DOTS, "1.0", CvarFlags::NONE, "noise dot multiplier"),
    def(VCR_GRAIN_INTENSITY, "1.0", CvarFlags::NONE, "grain alpha multiplier"),
    def(VCR_SCANLINE_ALPHA, "1.0", CvarFlags::NONE, "scanline alpha multiplier"),
    def(VCR_DISTORTION_INTERVAL, "20.0", CvarFlags::NONE, "seconds between distortion spikes"),
    def(VCR_DISTORTION_DURATION, "1.5", CvarFlags::NONE, "distortion spike length"),
    def(VCR_CCTV_CHANCE, "0.3", CvarFlags::NONE, "chance a spike opens a CCTV moment"),
];

/// Registers every variable in [`CVARS`] with its default.
pub fn register_defaults<S: CvarStore + ?Sized>(store: &mut S) {
    for cvar in &CVARS {
        store.register(cvar.name, cvar.default, cvar.flags);
    }
}

/// The host's key-value configuration store.
pub trait CvarStore {
    /// Registers a variable. Does nothing if `name` already exists.
    fn register(&mut self, name: &str, default: &str, flags: CvarFlags);

    /// Numeric value, or `None` if unregistered.
    fn value(&self, name: &str) -> Option<f32>;

    /// Integer value, or `None` if unregistered.
    fn integer(&self, name: &str) -> Option<i32> {
        self.value(name).map(|v| v as i32)
    }

    /// Sets a registered variable. Returns false, with no effect, if
    /// `name` is unregistered.
    fn set_value(&mut self, name: &str, value: f32) -> bool;
}

impl<T: CvarStore + ?Sized> CvarStore for &mut T {
    fn register(&mut self, name: &str, default: &str, flags: CvarFlags) {
        (**self).register(name, default, flags);
    }
    fn value(&self, name: &str) -> Option<f32> {
        (**self).value(name)
    }
    fn integer(&self, name: &str) -> Option<i32> {
        (**self).integer(name)
    }
    fn set_value(&mut self, name: &str, value: f32) -> bool {
        (**self).set_value(name, value)
    }
}

/// One stored variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CvarEntry {
    /// Value as text.
    pub string: String,
    /// Parsed value (0 if the text is not numeric).
    pub value: f32,
    /// Persistence flags.
    pub flags: CvarFlags,
}

impl CvarEntry {
    fn new(string: &str, flags: CvarFlags) -> Self {
        Self {
            string: string.to_owned(),
            value: string.trim().parse().unwrap_or(0.0),
            flags,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Archive {
    #[serde(default)]
    cvars: BTreeMap<String, String>,
}

/// In-memory store for hosts without their own cvar system, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCvars {
    entries: HashMap<String, CvarEntry>,
}

impl MemoryCvars {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with every effect variable at its default.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        register_defaults(&mut store);
        store
    }

    /// Looks up an entry.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&CvarEntry> {
        self.entries.get(name)
    }

    /// Sets a registered variable from text.
    pub fn set_string(&mut self, name: &str, value: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                *entry = CvarEntry::new(value, entry.flags);
                true
            }
            None => false,
        }
    }

    /// Number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes archive-flagged entries to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn archive_toml(&self) -> ConfigResult<String> {
        let archive = Archive {
            cvars: self
                .entries
                .iter()
                .filter(|(_, entry)| entry.flags.archive)
                .map(|(name, entry)| (name.clone(), entry.string.clone()))
                .collect(),
        };
        Ok(toml::to_string(&archive)?)
    }

    /// Restores archive-flagged entries from TOML.
    ///
    /// Unknown names, non-archived entries and non-numeric values are
    /// skipped. Returns the number of entries restored.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid archive.
    pub fn restore_toml(&mut self, text: &str) -> ConfigResult<usize> {
        let archive: Archive = toml::from_str(text)?;
        let mut restored = 0;
        for (name, value) in &archive.cvars {
            let Some(entry) = self.entries.get_mut(name) else {
                tracing::debug!(name = %name, "skipping unknown archived cvar");
                continue;
            };
            if !entry.flags.archive || value.trim().parse::<f32>().is_err() {
                continue;
            }
            *entry = CvarEntry::new(value, entry.flags);
            restored += 1;
        }
        Ok(restored)
    }

    /// Writes the archive to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_archive(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        std::fs::write(path, self.archive_toml()?)?;
        Ok(())
    }

    /// Restores entries from the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_archive(&mut self, path: impl AsRef<Path>) -> ConfigResult<usize> {
        let text = std::fs::read_to_string(path)?;
        self.restore_toml(&text)
    }
}

impl CvarStore for MemoryCvars {
    fn register(&mut self, name: &str, default: &str, flags: CvarFlags) {
        if !self.entries.contains_key(name) {
            self.entries
                .insert(name.to_owned(), CvarEntry::new(default, flags));
        }
    }

    fn value(&self, name: &str) -> Option<f32> {
        self.entries.get(name).map(|entry| entry.value)
    }

    fn set_value(&mut self, name: &str, value: f32) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.string = format_value(value);
                entry.value = value;
                true
            }
            None => false,
        }
    }
}

/// Integral values print without a fraction, as a console would.
fn format_value(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1.0e9 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Per-frame snapshot of every variable, with neutral defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    /// Master enable.
    pub enabled: bool,
    /// Clamped quality.
    pub quality: Quality,
    /// Clamped mode.
    pub mode: EffectMode,
    /// REC indicator toggle.
    pub rec_indicator: bool,
    /// Timestamp toggle.
    pub timestamp: bool,
    /// Tracking-line toggle.
    pub tracking_lines: bool,
    /// Static-burst toggle.
    pub static_bursts: bool,
    /// Debug overlay.
    pub debug: bool,
    /// Noise-dot multiplier.
    pub noise_dots: f32,
    /// Grain alpha multiplier.
    pub grain_intensity: f32,
    /// Scanline alpha multiplier.
    pub scanline_alpha: f32,
    /// Seconds between natural distortion spikes.
    pub distortion_interval: f32,
    /// Distortion spike length.
    pub distortion_duration: f32,
    /// Probability that a spike opens a CCTV moment.
    pub cctv_chance: f32,
}

impl FrameConfig {
    /// Reads a snapshot from the store.
    #[must_use]
    pub fn read<S: CvarStore + ?Sized>(store: &S) -> Self {
        let flag = |name: &str| store.integer(name).unwrap_or(0) != 0;
        let number = |name: &str| store.value(name).unwrap_or(0.0);
        Self {
            enabled: flag(VCR_ENABLED),
            quality: Quality::from_level(store.integer(VCR_QUALITY).unwrap_or(0)),
            mode: EffectMode::from_index(store.integer(VCR_MODE).unwrap_or(0)),
            rec_indicator: flag(VCR_REC_INDICATOR),
            timestamp: flag(VCR_TIMESTAMP),
            tracking_lines: flag(VCR_TRACKING_LINES),
            static_bursts: flag(VCR_STATIC_BURSTS),
            debug: flag(VCR_DEBUG),
            noise_dots: number(VCR_NOISE_DOTS).max(0.0),
            grain_intensity: number(VCR_GRAIN_INTENSITY).max(0.0),
            scanline_alpha: number(VCR_SCANLINE_ALPHA).max(0.0),
            distortion_interval: number(VCR_DISTORTION_INTERVAL),
            distortion_duration: number(VCR_DISTORTION_DURATION).max(0.0),
            cctv_chance: number(VCR_CCTV_CHANCE).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let store = MemoryCvars::with_defaults();
        assert_eq!(store.len(), CVARS.len());
        assert_eq!(store.integer(VCR_QUALITY), Some(2));
        assert_eq!(store.value(VCR_DISTORTION_DURATION), Some(1.5));
    }

    #[test]
    fn test_register_keeps_existing_value() {
        let mut store = MemoryCvars::with_defaults();
        assert!(store.set_value(VCR_MODE, 1.0));
        store.register(VCR_MODE, "0", CvarFlags::ARCHIVE);
        assert_eq!(store.integer(VCR_MODE), Some(1));
    }

    #[test]
    fn test_set_unregistered_is_rejected() {
        let mut store = MemoryCvars::new();
        assert!(!store.set_value("vcr_bogus", 1.0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_store_reads_neutral() {
        let config = FrameConfig::read(&MemoryCvars::new());
        assert!(!config.enabled);
        assert_eq!(config.quality, Quality::Low);
        assert_eq!(config.mode, EffectMode::Vcr);
        assert_eq!(config.noise_dots, 0.0);
    }

    #[test]
    fn test_archive_only_persists_archive_flag() {
        let mut store = MemoryCvars::with_defaults();
        store.set_value(VCR_QUALITY, 0.0);
        store.set_value(VCR_NOISE_DOTS, 3.0);
        let text = store.archive_toml().unwrap();

        assert!(text.contains("vcr_quality"));
        assert!(!text.contains("vcr_noise_dots"));

        let mut fresh = MemoryCvars::with_defaults();
        let restored = fresh.restore_toml(&text).unwrap();
        assert_eq!(restored, 7);
        assert_eq!(fresh.integer(VCR_QUALITY), Some(0));
        assert_eq!(fresh.value(VCR_NOISE_DOTS), Some(1.0));
    }

    #[test]
    fn test_restore_skips_bad_entries() {
        let mut store = MemoryCvars::with_defaults();
        let text = "[cvars]\nvcr_mode = \"abc\"\nvcr_debug = \"1\"\nvcr_unknown = \"1\"\nvcr_quality = \"1\"\n";
        assert_eq!(store.restore_toml(text).unwrap(), 1);
        assert_eq!(store.integer(VCR_MODE), Some(0));
        assert_eq!(store.integer(VCR_DEBUG), Some(0));
        assert_eq!(store.integer(VCR_QUALITY), Some(1));
    }

    #[test]
    fn test_set_value_formats_integers() {
        let mut store = MemoryCvars::with_defaults();
        store.set_value(VCR_MODE, 3.0);
        assert_eq!(store.entry(VCR_MODE).unwrap().string, "3");
    }
}
