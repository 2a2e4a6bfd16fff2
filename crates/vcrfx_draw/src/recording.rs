//! Recording backend.
//!
//! Models the fixed-function state machine closely enough to verify that a
//! frame leaves the context exactly as it found it, and records every
//! primitive with the blend mode it was submitted under.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::immediate::{ImmediateDraw, MatrixStack, Point};
use crate::rect::Rect;

/// Attribute state covered by `push_state` / `pop_state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    /// Current color.
    pub color: Color,
    /// Bound texture.
    pub texture: Option<u32>,
    /// Active blend mode.
    pub blend: BlendMode,
    /// Blending enabled.
    pub blending: bool,
    /// Depth test enabled.
    pub depth_test: bool,
    /// Face culling enabled.
    pub cull_face: bool,
    /// Texturing enabled.
    pub texturing: bool,
    /// Lighting enabled.
    pub lighting: bool,
}

impl Default for DrawState {
    /// State a 3D scene pass typically leaves behind.
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            texture: Some(1),
            blend: BlendMode::Alpha,
            blending: false,
            depth_test: true,
            cull_face: true,
            texturing: true,
            lighting: false,
        }
    }
}

/// A 2D affine matrix restricted to what the overlay uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix2D {
    /// Orthographic extent, if an ortho projection is loaded.
    pub ortho: Option<(f32, f32)>,
    /// Accumulated translation.
    pub translation: (f32, f32),
}

/// A recorded primitive or marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Debug marker.
    Marker(&'static str),
    /// Filled quad.
    Rect {
        /// Bounds (pre-transform).
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Blend mode at submission.
        blend: BlendMode,
    },
    /// Filled triangle.
    Triangle {
        /// Vertices.
        vertices: [Point; 3],
        /// Fill color.
        color: Color,
        /// Blend mode at submission.
        blend: BlendMode,
    },
    /// Line segment.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Line color.
        color: Color,
        /// Blend mode at submission.
        blend: BlendMode,
    },
    /// Square point.
    Point {
        /// Center.
        position: Point,
        /// Edge length in pixels.
        size: f32,
        /// Point color.
        color: Color,
        /// Blend mode at submission.
        blend: BlendMode,
    },
}

impl DrawCommand {
    /// Returns true for geometry (anything but a marker).
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Marker(_))
    }

    /// Blend mode of a primitive.
    #[must_use]
    pub const fn blend(&self) -> Option<BlendMode> {
        match self {
            Self::Marker(_) => None,
            Self::Rect { blend, .. }
            | Self::Triangle { blend, .. }
            | Self::Line { blend, .. }
            | Self::Point { blend, .. } => Some(*blend),
        }
    }

    /// Color of a primitive.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        match self {
            Self::Marker(_) => None,
            Self::Rect { color, .. }
            | Self::Triangle { color, .. }
            | Self::Line { color, .. }
            | Self::Point { color, .. } => Some(*color),
        }
    }
}

/// Backend that records commands and tracks fixed-function state.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    state: DrawState,
    state_stack: Vec<DrawState>,
    projection: Matrix2D,
    modelview: Matrix2D,
    projection_stack: Vec<Matrix2D>,
    modelview_stack: Vec<Matrix2D>,
    commands: Vec<DrawCommand>,
    /// Pops without a matching push.
    underflows: u32,
}

impl RecordingCanvas {
    /// Creates a canvas in the default post-scene state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(DrawState::default())
    }

    /// Creates a canvas in a specific initial state.
    #[must_use]
    pub fn with_state(state: DrawState) -> Self {
        Self {
            state,
            state_stack: Vec::with_capacity(8),
            projection: Matrix2D::default(),
            modelview: Matrix2D::default(),
            projection_stack: Vec::with_capacity(8),
            modelview_stack: Vec::with_capacity(8),
            commands: Vec::with_capacity(4096),
            underflows: 0,
        }
    }

    /// Clears recorded commands; state is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Current attribute state.
    #[must_use]
    pub const fn state(&self) -> DrawState {
        self.state
    }

    /// Current matrix of a stack.
    #[must_use]
    pub const fn matrix(&self, stack: MatrixStack) -> Matrix2D {
        match stack {
            MatrixStack::Projection => self.projection,
            MatrixStack::ModelView => self.modelview,
        }
    }

    /// Depth of a matrix stack.
    #[must_use]
    pub fn matrix_depth(&self, stack: MatrixStack) -> usize {
        match stack {
            MatrixStack::Projection => self.projection_stack.len(),
            MatrixStack::ModelView => self.modelview_stack.len(),
        }
    }

    /// Depth of the attribute stack.
    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Number of pops that had nothing to pop.
    #[must_use]
    pub const fn underflows(&self) -> u32 {
        self.underflows
    }

    /// True when every stack is back at depth zero with no underflow.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.state_stack.is_empty()
            && self.projection_stack.is_empty()
            && self.modelview_stack.is_empty()
            && self.underflows == 0
    }

    /// All recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded primitives (markers excluded).
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_primitive()).count()
    }

    /// Markers in submission order.
    pub fn markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Marker(label) => Some(*label),
            _ => None,
        })
    }

    /// Returns true if a marker with this label was recorded.
    #[must_use]
    pub fn has_marker(&self, label: &str) -> bool {
        self.markers().any(|m| m == label)
    }

    /// Primitives between the first `label` marker and the next marker.
    #[must_use]
    pub fn section(&self, label: &str) -> &[DrawCommand] {
        let Some(start) = self
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Marker(m) if *m == label))
        else {
            return &[];
        };
        let rest = &self.commands[start + 1..];
        let end = rest
            .iter()
            .position(|c| matches!(c, DrawCommand::Marker(_)))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl ImmediateDraw for RecordingCanvas {
    fn push_state(&mut self) {
        self.state_stack.push(self.state);
    }

    fn pop_state(&mut self) {
        match self.state_stack.pop() {
            Some(saved) => self.state = saved,
            None => self.underflows += 1,
        }
    }

    fn push_matrix(&mut self, stack: MatrixStack) {
        match stack {
            MatrixStack::Projection => self.projection_stack.push(self.projection),
            MatrixStack::ModelView => self.modelview_stack.push(self.modelview),
        }
    }

    fn pop_matrix(&mut self, stack: MatrixStack) {
        let (current, saved) = match stack {
            MatrixStack::Projection => (&mut self.projection, self.projection_stack.pop()),
            MatrixStack::ModelView => (&mut self.modelview, self.modelview_stack.pop()),
        };
        match saved {
            Some(matrix) => *current = matrix,
            None => self.underflows += 1,
        }
    }

    fn load_ortho(&mut self, width: f32, height: f32) {
        self.projection = Matrix2D {
            ortho: Some((width, height)),
            translation: (0.0, 0.0),
        };
        self.modelview = Matrix2D::default();
    }

    fn prepare_overlay(&mut self) {
        self.state.depth_test = false;
        self.state.cull_face = false;
        self.state.texturing = false;
        self.state.lighting = false;
        self.state.blending = true;
        self.state.blend = BlendMode::Alpha;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.modelview.translation.0 += dx;
        self.modelview.translation.1 += dy;
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.state.blend = mode;
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn bind_texture(&mut self, texture: Option<u32>) {
        self.state.texture = texture;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.state.color = color;
        let blend = self.state.blend;
        self.record(DrawCommand::Rect { rect, color, blend });
    }

    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) {
        self.state.color = color;
        let blend = self.state.blend;
        self.record(DrawCommand::Triangle { vertices, color, blend });
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.state.color = color;
        let blend = self.state.blend;
        self.record(DrawCommand::Line { from, to, color, blend });
    }

    fn point(&mut self, position: Point, size: f32, color: Color) {
        self.state.color = color;
        let blend = self.state.blend;
        self.record(DrawCommand::Point {
            position,
            size,
            color,
            blend,
        });
    }

    fn debug_marker(&mut self, label: &'static str) {
        self.record(DrawCommand::Marker(label));
    }
}
