//! # VCRFX
//!
//! Analog recording overlay for first-person engines: VCR tape, CCTV
//! security footage, camcorder found footage and night vision, drawn as
//! blended 2D geometry after the 3D scene and before the UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        OVERLAY FRAME                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  VcrEffect::draw → FrameConfig::read → OverlayPass::begin     │
//! │        ↓                                    ↓                 │
//! │  timeline::advance (50s cycle + events) → layers (fixed order)│
//! │        ↓                                    ↓                 │
//! │  TapeRng reseed                        OverlayPass drop       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use vcrfx::{MemoryCvars, VcrEffect};
//! use vcrfx_draw::RecordingCanvas;
//!
//! let mut effect = VcrEffect::new(MemoryCvars::new());
//! effect.init();
//! effect.set_mode(1);
//!
//! let mut canvas = RecordingCanvas::new();
//! let report = effect.draw(&mut canvas, 1920, 1080, 15.0);
//! assert!(report.drawn);
//! assert!(canvas.is_balanced());
//! ```
//!
//! ## Guarantees
//!
//! - No heap allocation per frame
//! - Graphics state after a frame equals graphics state before it
//! - Same seed and frame times produce the same overlay

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod compositor;
pub mod config;
pub mod effect;
pub mod error;
pub mod layers;
pub mod mode;
pub mod preset;
pub mod rng;
pub mod state;
pub mod timeline;

pub use clock::{FixedClock, LocalClock, OsdTime, WallClock};
pub use compositor::{FrameReport, Layer, LayerSet, OverlayPass};
pub use config::{CvarFlags, CvarStore, FrameConfig, MemoryCvars, CVARS};
pub use effect::VcrEffect;
pub use error::{ConfigError, ConfigResult};
pub use layers::Viewport;
pub use mode::EffectMode;
pub use preset::{Quality, QualityPreset};
pub use rng::TapeRng;
pub use state::EffectState;
pub use timeline::FrameParams;
