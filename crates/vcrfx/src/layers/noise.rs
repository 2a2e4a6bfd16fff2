//! Point and line noise: grain, dots, scanlines, static.

use vcrfx_draw::{Color, ImmediateDraw};

use super::{marker, Viewport};
use crate::rng::TapeRng;

/// Viewport pixels per grain point at multiplier 1.
pub const GRAIN_PIXELS_PER_DOT: u32 = 2000;
/// Viewport pixels per static point.
pub const STATIC_PIXELS_PER_DOT: u32 = 50;
/// Horizontal tears per static burst.
pub const STATIC_TEARS: usize = 5;
/// Base scanline alpha before the tunable multiplier.
pub const SCANLINE_ALPHA: f32 = 0.03;

/// Film grain. No-op when `quality_mult <= 0`.
///
/// Each point is pure white or pure black; brighter rolls are also more
/// opaque.
pub fn film_grain<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    rng: &mut TapeRng,
    intensity: f32,
    quality_mult: f32,
) -> bool {
    if quality_mult <= 0.0 {
        return false;
    }
    let count = ((view.area() / GRAIN_PIXELS_PER_DOT) as f32 * quality_mult) as u32;
    if count == 0 {
        return false;
    }
    draw.debug_marker(marker::GRAIN);

    for _ in 0..count {
        let x = rng.next_float() * view.w();
        let y = rng.next_float() * view.h();
        let brightness = rng.next_float();
        let alpha = intensity * (0.3 + brightness * 0.7);
        let color = if brightness > 0.5 {
            Color::WHITE
        } else {
            Color::BLACK
        };
        draw.point((x, y), 1.0, color.with_alpha(alpha));
    }
    true
}

/// Bright specks. No-op when `count <= 0`.
pub fn noise_dots<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    rng: &mut TapeRng,
    count: i32,
    base_alpha: f32,
) -> bool {
    if count <= 0 {
        return false;
    }
    draw.debug_marker(marker::NOISE_DOTS);

    for _ in 0..count {
        let x = rng.next_float() * view.w();
        let y = rng.next_float() * view.h();
        let brightness = 0.7 + rng.next_float() * 0.3;
        let alpha = base_alpha * (0.5 + rng.next_float() * 0.5);
        draw.point((x, y), 2.0, Color::grey(brightness, alpha));
    }
    true
}

/// Horizontal 1px lines every `skip` pixels. A zero stride falls back to 2.
pub fn scanlines<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, alpha: f32, skip: u32) {
    draw.debug_marker(marker::SCANLINES);

    let skip = if skip < 1 { 2 } else { skip };
    let color = Color::BLACK.with_alpha(alpha);
    for y in (0..view.height).step_by(skip as usize) {
        let y = y as f32;
        draw.line((0.0, y), (view.w(), y), color);
    }
}

/// Dense static with horizontal tears.
pub fn static_burst<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    rng: &mut TapeRng,
    intensity: f32,
) {
    draw.debug_marker(marker::STATIC);

    for _ in 0..view.area() / STATIC_PIXELS_PER_DOT {
        let x = rng.next_float() * view.w();
        let y = rng.next_float() * view.h();
        let brightness = rng.next_float();
        draw.point((x, y), 2.0, Color::grey(brightness, intensity));
    }

    for _ in 0..STATIC_TEARS {
        let y = rng.next_float() * view.h();
        let offset = rng.next_centered() * 20.0;
        draw.fill_rect(view.band(offset, y, 2.0), Color::grey(0.5, intensity * 0.5));
    }
}
