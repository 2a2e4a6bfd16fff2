//! # VCRFX Draw
//!
//! The 2D immediate-mode capability the overlay renders through.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     DRAW CAPABILITY                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  Layer code → ImmediateDraw → Backend                     │
//! │                    ↓              ↓                       │
//! │           quads/points/lines   RecordingCanvas (verify)   │
//! │           blend + stacks       QuadBatcher (GPU upload)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A host engine with a fixed-function pipeline implements [`ImmediateDraw`]
//! directly on its GL context; a modern renderer uses [`QuadBatcher`] and
//! uploads [`QuadBatcher::vertex_bytes`] once per frame.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod batch;
pub mod blend;
pub mod color;
pub mod immediate;
pub mod recording;
pub mod rect;

pub use batch::{OverlayVertex, QuadBatcher, VertexBatch};
pub use blend::{BlendFactor, BlendMode, BlendStateConfig};
pub use color::Color;
pub use immediate::{ImmediateDraw, MatrixStack, Point};
pub use recording::{DrawCommand, DrawState, Matrix2D, RecordingCanvas};
pub use rect::Rect;
