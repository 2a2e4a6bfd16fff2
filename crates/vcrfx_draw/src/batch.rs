//! Batching backend.
//!
//! Converts immediate calls into triangle lists grouped by blend mode, ready
//! for a single buffer upload per frame. Buffers keep their capacity across
//! frames, so steady-state frames do not allocate.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::immediate::{ImmediateDraw, MatrixStack, Point};
use crate::rect::Rect;

/// Vertex for overlay rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// Position in pixels (x, y).
    pub position: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl OverlayVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// A contiguous run of vertices sharing one blend mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBatch {
    /// Blend mode for the whole run.
    pub blend: BlendMode,
    /// First vertex index.
    pub first: u32,
    /// Vertex count (multiple of 3).
    pub count: u32,
}

#[derive(Debug, Clone, Copy)]
struct SavedState {
    blend: BlendMode,
    color: Color,
    texture: Option<u32>,
}

/// Immediate-draw backend producing batched triangle lists.
pub struct QuadBatcher {
    vertices: Vec<OverlayVertex>,
    batches: Vec<VertexBatch>,
    blend: BlendMode,
    color: Color,
    texture: Option<u32>,
    state_stack: Vec<SavedState>,
    translation: (f32, f32),
    projection_stack: Vec<(f32, f32)>,
    modelview_stack: Vec<(f32, f32)>,
    viewport: (f32, f32),
}

impl QuadBatcher {
    /// Creates a batcher sized for a dense 1080p overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(65_536)
    }

    /// Creates a batcher with room for `vertices` vertices.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            batches: Vec::with_capacity(64),
            blend: BlendMode::Alpha,
            color: Color::WHITE,
            texture: None,
            state_stack: Vec::with_capacity(8),
            translation: (0.0, 0.0),
            projection_stack: Vec::with_capacity(8),
            modelview_stack: Vec::with_capacity(8),
            viewport: (0.0, 0.0),
        }
    }

    /// Begins a new frame. Capacity is retained.
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    /// Vertices submitted this frame.
    #[must_use]
    pub fn vertices(&self) -> &[OverlayVertex] {
        &self.vertices
    }

    /// Vertex data as raw bytes for buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Batches submitted this frame.
    #[must_use]
    pub fn batches(&self) -> &[VertexBatch] {
        &self.batches
    }

    /// Viewport of the last ortho projection.
    #[must_use]
    pub const fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Current color and texture binding.
    #[must_use]
    pub const fn binding(&self) -> (Color, Option<u32>) {
        (self.color, self.texture)
    }

    fn emit(&mut self, corners: [Point; 3], color: Color) {
        let (dx, dy) = self.translation;
        let rgba = color.to_array();
        let first = self.vertices.len() as u32;
        for (x, y) in corners {
            self.vertices.push(OverlayVertex::new(x + dx, y + dy, rgba));
        }

        match self.batches.last_mut() {
            Some(batch) if batch.blend == self.blend && batch.first + batch.count == first => {
                batch.count += 3;
            }
            _ => self.batches.push(VertexBatch {
                blend: self.blend,
                first,
                count: 3,
            }),
        }
    }

    fn emit_quad(&mut self, corners: [Point; 4], color: Color) {
        self.emit([corners[0], corners[1], corners[2]], color);
        self.emit([corners[0], corners[2], corners[3]], color);
    }
}

impl Default for QuadBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImmediateDraw for QuadBatcher {
    fn push_state(&mut self) {
        self.state_stack.push(SavedState {
            blend: self.blend,
            color: self.color,
            texture: self.texture,
        });
    }

    fn pop_state(&mut self) {
        if let Some(saved) = self.state_stack.pop() {
            self.blend = saved.blend;
            self.color = saved.color;
            self.texture = saved.texture;
        }
    }

    fn push_matrix(&mut self, stack: MatrixStack) {
        match stack {
            MatrixStack::Projection => self.projection_stack.push(self.viewport),
            MatrixStack::ModelView => self.modelview_stack.push(self.translation),
        }
    }

    fn pop_matrix(&mut self, stack: MatrixStack) {
        match stack {
            MatrixStack::Projection => {
                if let Some(viewport) = self.projection_stack.pop() {
                    self.viewport = viewport;
                }
            }
            MatrixStack::ModelView => {
                if let Some(translation) = self.modelview_stack.pop() {
                    self.translation = translation;
                }
            }
        }
    }

    fn load_ortho(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.translation = (0.0, 0.0);
    }

    fn prepare_overlay(&mut self) {
        self.blend = BlendMode::Alpha;
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bind_texture(&mut self, texture: Option<u32>) {
        self.texture = texture;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.color = color;
        self.emit_quad(rect.corners(), color);
    }

    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) {
        self.color = color;
        self.emit(vertices, color);
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.color = color;
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f32::EPSILON {
            return;
        }
        // Half-pixel normal gives a 1px wide quad.
        let (nx, ny) = (-dy / len * 0.5, dx / len * 0.5);
        self.emit_quad(
            [
                (from.0 + nx, from.1 + ny),
                (to.0 + nx, to.1 + ny),
                (to.0 - nx, to.1 - ny),
                (from.0 - nx, from.1 - ny),
            ],
            color,
        );
    }

    fn point(&mut self, position: Point, size: f32, color: Color) {
        self.color = color;
        let half = size * 0.5;
        let rect = Rect::new(position.0 - half, position.1 - half, size, size);
        self.emit_quad(rect.corners(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_split_on_blend_change() {
        let mut batcher = QuadBatcher::new();
        batcher.begin_frame();

        batcher.set_blend(BlendMode::Multiply);
        batcher.fill_rect(Rect::screen(100.0, 100.0), Color::grey(0.9, 1.0));
        batcher.set_blend(BlendMode::Alpha);
        batcher.fill_rect(Rect::screen(100.0, 100.0), Color::grey(0.5, 0.2));
        batcher.point((5.0, 5.0), 2.0, Color::WHITE);

        let batches = batcher.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].blend, BlendMode::Multiply);
        assert_eq!(batches[0].count, 6);
        assert_eq!(batches[1].count, 12);
        assert_eq!(batcher.vertices().len(), 18);
    }

    #[test]
    fn test_translation_applies_and_pops() {
        let mut batcher = QuadBatcher::new();
        batcher.push_matrix(MatrixStack::ModelView);
        batcher.translate(3.0, -1.0);
        batcher.fill_triangle([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], Color::WHITE);
        batcher.pop_matrix(MatrixStack::ModelView);
        batcher.fill_triangle([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], Color::WHITE);

        assert_eq!(batcher.vertices()[0].position, [3.0, -1.0]);
        assert_eq!(batcher.vertices()[3].position, [0.0, 0.0]);
    }

    #[test]
    fn test_vertex_bytes_match_layout() {
        let mut batcher = QuadBatcher::new();
        batcher.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        assert_eq!(
            batcher.vertex_bytes().len(),
            6 * std::mem::size_of::<OverlayVertex>()
        );
    }

    #[test]
    fn test_begin_frame_keeps_capacity() {
        let mut batcher = QuadBatcher::with_capacity(12);
        batcher.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        let capacity = batcher.vertices.capacity();
        batcher.begin_frame();
        assert!(batcher.vertices().is_empty());
        assert_eq!(batcher.vertices.capacity(), capacity);
    }
}
