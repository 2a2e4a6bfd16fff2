//! Security-camera look: dark wash, flicker, radial vignette, speckle.

use vcrfx_draw::{Color, ImmediateDraw, Rect};

use super::{flicker, marker, noise_dots, Viewport};
use crate::preset::QualityPreset;
use crate::rng::TapeRng;

/// Vignette darkness at the corners.
pub const CCTV_VIGNETTE: f32 = 0.3;
/// Speckle count at noise multiplier 1.
pub const CCTV_NOISE_DOTS: f32 = 80.0;

/// Draws the full CCTV overlay.
///
/// The vignette is a grid of `vignette_step` cells, each darkened by the
/// squared distance of its corner from the screen center.
pub fn cctv_overlay<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    rng: &mut TapeRng,
    preset: &QualityPreset,
    intensity: f32,
    time: f32,
) {
    draw.debug_marker(marker::CCTV);

    let screen = view.rect();
    draw.fill_rect(screen, Color::grey(0.1, intensity * 0.3));
    draw.fill_rect(screen, Color::BLACK.with_alpha(intensity * 0.15));

    if preset.flicker {
        flicker(draw, view, intensity, time);
    }

    let (cx, cy) = screen.center();
    let max_dist = (cx * cx + cy * cy).sqrt();
    let step = preset.vignette_step.max(1);
    let size = step as f32;

    if max_dist > 0.0 {
        for y in (0..view.height).step_by(step as usize) {
            for x in (0..view.width).step_by(step as usize) {
                let fx = x as f32 - cx;
                let fy = y as f32 - cy;
                let dist = (fx * fx + fy * fy).sqrt() / max_dist;
                let alpha = dist * dist * CCTV_VIGNETTE * intensity;
                draw.fill_rect(
                    Rect::new(x as f32, y as f32, size, size),
                    Color::BLACK.with_alpha(alpha),
                );
            }
        }
    }

    noise_dots(
        draw,
        view,
        rng,
        (CCTV_NOISE_DOTS * preset.noise_mult) as i32,
        0.8,
    );
}
