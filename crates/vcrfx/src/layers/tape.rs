//! Tape-transport artifacts: tracking band, damage bands, head jitter.

use vcrfx_draw::{Color, ImmediateDraw};

use super::{marker, Viewport};
use crate::rng::TapeRng;
use crate::timeline::TRACKING_LINE_HEIGHT;

/// Damage bands drawn per tape-damage event.
pub const TAPE_DAMAGE_LINES: usize = 5;
/// Downward speed of the damage bands (px/s).
pub const DAMAGE_LINE_SPEED: f32 = 30.0;

/// Dark band with a red fringe above and a cyan fringe below.
pub fn tracking_band<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, y: f32) {
    draw.debug_marker(marker::TRACKING);

    let h = TRACKING_LINE_HEIGHT;
    draw.fill_rect(view.band(0.0, y, h), Color::grey(0.1, 0.3));
    draw.fill_rect(view.band(0.0, y - 1.0, 1.0), Color::RED.with_alpha(0.1));
    draw.fill_rect(view.band(0.0, y + h, 1.0), Color::CYAN.with_alpha(0.1));
}

/// Translates the rest of the overlay by a random offset.
///
/// Horizontal reach is `±amplitude`, vertical `±amplitude / 2`.
pub fn apply_jitter<D: ImmediateDraw + ?Sized>(draw: &mut D, rng: &mut TapeRng, amplitude: f32) {
    draw.debug_marker(marker::JITTER);

    let dx = rng.next_centered() * 2.0 * amplitude;
    let dy = rng.next_centered() * amplitude;
    draw.translate(dx, dy);
}

/// Corruption bands with noise and chroma fringes, then scrolls them.
///
/// Bands that leave the bottom edge are recycled above the top.
pub fn tape_damage<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    rng: &mut TapeRng,
    lines: &mut [f32],
    intensity: f32,
    dt: f32,
) {
    draw.debug_marker(marker::TAPE_DAMAGE);

    let count = lines.len().min(TAPE_DAMAGE_LINES);
    for line in &mut lines[..count] {
        let y = *line;
        let band_height = 3.0 + rng.next_float() * 5.0;

        draw.fill_rect(view.band(0.0, y, band_height), Color::grey(0.2, intensity * 0.7));

        let dots = 20 + rng.next_int(30);
        for _ in 0..dots {
            let dx = rng.next_float() * view.w();
            let dy = y + rng.next_float() * band_height;
            let b = rng.next_float();
            draw.point((dx, dy), 1.0, Color::grey(b, intensity));
        }

        let fringe = intensity * 0.3;
        let red_shift = rng.next_float() * 5.0;
        draw.fill_rect(view.band(red_shift, y - 1.0, 1.0), Color::RED.with_alpha(fringe));
        let cyan_shift = -rng.next_float() * 5.0;
        draw.fill_rect(
            view.band(cyan_shift, y + band_height, 1.0),
            Color::CYAN.with_alpha(fringe),
        );

        *line += DAMAGE_LINE_SPEED * dt;
        if *line > view.h() + 10.0 {
            *line = -10.0 - rng.next_float() * 50.0;
        }
    }
}
