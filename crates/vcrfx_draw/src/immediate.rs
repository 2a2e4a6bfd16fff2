//! The immediate-mode 2D drawing capability.
//!
//! Modeled on a fixed-function pipeline: a current color, a texture binding,
//! a blend mode, an attribute stack and two matrix stacks. The overlay only
//! ever submits flat-colored geometry in pixel coordinates.

use crate::blend::BlendMode;
use crate::color::Color;
use crate::rect::Rect;

/// A 2D point in pixel coordinates.
pub type Point = (f32, f32);

/// Which matrix stack a push/pop addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixStack {
    /// Projection matrix.
    Projection,
    /// Model-view matrix.
    ModelView,
}

/// Minimal immediate-mode 2D drawing surface.
///
/// Every `push_*` must be matched by the corresponding `pop_*` before the
/// caller returns control to the host. Primitives use the blend mode set by
/// the last `set_blend` call.
pub trait ImmediateDraw {
    /// Saves all attribute state (color, texture binding, blend, capability flags).
    fn push_state(&mut self);

    /// Restores the attribute state saved by the matching `push_state`.
    fn pop_state(&mut self);

    /// Saves the current matrix of `stack`.
    fn push_matrix(&mut self, stack: MatrixStack);

    /// Restores the matrix of `stack` saved by the matching `push_matrix`.
    fn pop_matrix(&mut self, stack: MatrixStack);

    /// Loads a pixel-space orthographic projection (origin top-left, y down)
    /// and resets the model-view matrix to identity.
    fn load_ortho(&mut self, width: f32, height: f32);

    /// Disables depth test, face culling, texturing and lighting, and
    /// enables standard alpha blending.
    fn prepare_overlay(&mut self);

    /// Post-multiplies the model-view matrix by a translation.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Selects the blend mode for subsequent primitives.
    fn set_blend(&mut self, mode: BlendMode);

    /// Sets the current color.
    fn set_color(&mut self, color: Color);

    /// Binds a texture, or unbinds with `None`.
    fn bind_texture(&mut self, texture: Option<u32>);

    /// Draws a filled axis-aligned quad.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a filled triangle.
    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color);

    /// Draws a 1px line segment.
    fn line(&mut self, from: Point, to: Point, color: Color);

    /// Draws a square point of `size` pixels centered on `position`.
    fn point(&mut self, position: Point, size: f32, color: Color);

    /// Labels the primitives that follow (debug groups, captures, tests).
    fn debug_marker(&mut self, _label: &'static str) {}

    /// Draws a filled circle as a triangle fan of `segments` slices.
    fn fill_circle(&mut self, center: Point, radius: f32, segments: u32, color: Color) {
        let segments = segments.max(3);
        let step = std::f32::consts::TAU / segments as f32;
        let mut prev = (center.0 + radius, center.1);
        for i in 1..=segments {
            let angle = step * i as f32;
            let next = (center.0 + angle.cos() * radius, center.1 + angle.sin() * radius);
            self.fill_triangle([center, prev, next], color);
            prev = next;
        }
    }
}

impl<T: ImmediateDraw + ?Sized> ImmediateDraw for &mut T {
    fn push_state(&mut self) {
        (**self).push_state();
    }
    fn pop_state(&mut self) {
        (**self).pop_state();
    }
    fn push_matrix(&mut self, stack: MatrixStack) {
        (**self).push_matrix(stack);
    }
    fn pop_matrix(&mut self, stack: MatrixStack) {
        (**self).pop_matrix(stack);
    }
    fn load_ortho(&mut self, width: f32, height: f32) {
        (**self).load_ortho(width, height);
    }
    fn prepare_overlay(&mut self) {
        (**self).prepare_overlay();
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        (**self).translate(dx, dy);
    }
    fn set_blend(&mut self, mode: BlendMode) {
        (**self).set_blend(mode);
    }
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color);
    }
    fn bind_texture(&mut self, texture: Option<u32>) {
        (**self).bind_texture(texture);
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        (**self).fill_rect(rect, color);
    }
    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) {
        (**self).fill_triangle(vertices, color);
    }
    fn line(&mut self, from: Point, to: Point, color: Color) {
        (**self).line(from, to, color);
    }
    fn point(&mut self, position: Point, size: f32, color: Color) {
        (**self).point(position, size, color);
    }
    fn debug_marker(&mut self, label: &'static str) {
        (**self).debug_marker(label);
    }
}
