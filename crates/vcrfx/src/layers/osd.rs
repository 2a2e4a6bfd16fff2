//! Camcorder on-screen display: REC lamp, timestamp, battery, debug bar.
//!
//! All text is built from rectangles. There is no font.

use vcrfx_draw::{Color, ImmediateDraw, Rect};

use super::{marker, Viewport};
use crate::clock::OsdTime;
use crate::timeline::LOOP_SECONDS;

/// REC lamp half-period (seconds).
pub const REC_BLINK_SPEED: f32 = 1.0;
/// Battery level below which the gauge turns red and blinks.
pub const BATTERY_LOW_THRESHOLD: f32 = 0.2;
/// Low-battery blink period (seconds).
pub const BATTERY_BLINK_SPEED: f32 = 0.5;

const REC_ORIGIN: (f32, f32) = (20.0, 20.0);
const REC_DOT_SIZE: f32 = 8.0;

/// "REC" glyph strokes relative to the indicator origin.
const REC_GLYPH: [(f32, f32, f32, f32); 12] = [
    // R
    (19.0, 3.0, 2.0, 6.0),
    (19.0, 3.0, 5.0, 1.0),
    (23.0, 3.0, 1.0, 3.0),
    (19.0, 5.0, 5.0, 1.0),
    (22.0, 6.0, 2.0, 3.0),
    // E
    (26.0, 3.0, 2.0, 6.0),
    (26.0, 3.0, 5.0, 1.0),
    (26.0, 5.0, 4.0, 1.0),
    (26.0, 8.0, 5.0, 1.0),
    // C
    (33.0, 3.0, 2.0, 6.0),
    (33.0, 3.0, 5.0, 1.0),
    (33.0, 8.0, 5.0, 1.0),
];

/// Seven-segment patterns, bit 0 = A through bit 6 = G.
///
/// ```text
///    A
///  F   B
///    G
///  E   C
///    D
/// ```
const SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

const DIGIT_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.9);
const DIGIT_SIZE: f32 = 12.0;

#[derive(Clone, Copy)]
enum Cell {
    Digit(usize),
    Dash,
    Colon,
    Space,
}

/// `MM-DD-2007  HH:MM:SS`, indices into [`OsdTime::digits`].
const TIMESTAMP_LAYOUT: [Cell; 19] = [
    Cell::Digit(0),
    Cell::Digit(1),
    Cell::Dash,
    Cell::Digit(2),
    Cell::Digit(3),
    Cell::Dash,
    Cell::Digit(4),
    Cell::Digit(5),
    Cell::Digit(6),
    Cell::Digit(7),
    Cell::Space,
    Cell::Digit(8),
    Cell::Digit(9),
    Cell::Colon,
    Cell::Digit(10),
    Cell::Digit(11),
    Cell::Colon,
    Cell::Digit(12),
    Cell::Digit(13),
];

/// Blinking REC lamp with a plate and hand-drawn lettering.
pub fn rec_indicator<D: ImmediateDraw + ?Sized>(draw: &mut D, time: f32) {
    draw.debug_marker(marker::REC);

    let lit = time.rem_euclid(REC_BLINK_SPEED * 2.0) < REC_BLINK_SPEED;
    let alpha = if lit { 1.0 } else { 0.3 };
    let (x, y) = REC_ORIGIN;
    let radius = REC_DOT_SIZE / 2.0;

    draw.fill_circle((x + radius, y + radius), radius, 16, Color::RED.with_alpha(alpha));

    draw.fill_rect(Rect::new(x + 15.0, y, 30.0, 12.0), Color::RED.with_alpha(alpha * 0.8));
    draw.fill_rect(Rect::new(x + 17.0, y + 2.0, 26.0, 8.0), Color::BLACK);

    let ink = Color::WHITE.with_alpha(alpha);
    for &(gx, gy, gw, gh) in &REC_GLYPH {
        draw.fill_rect(Rect::new(x + gx, y + gy, gw, gh), ink);
    }
}

/// One seven-segment digit. Values above 9 draw nothing.
pub fn digit<D: ImmediateDraw + ?Sized>(draw: &mut D, x: f32, y: f32, size: f32, value: u8) {
    let Some(&pattern) = SEGMENTS.get(usize::from(value)) else {
        return;
    };
    let w = size * 0.6;
    let h = size;
    let t = size * 0.15;

    let segments = [
        Rect::new(x, y, w, t),
        Rect::new(x + w - t, y, t, h / 2.0),
        Rect::new(x + w - t, y + h / 2.0, t, h / 2.0),
        Rect::new(x, y + h - t, w, t),
        Rect::new(x, y + h / 2.0, t, h / 2.0),
        Rect::new(x, y, t, h / 2.0),
        Rect::new(x, y + h / 2.0 - t / 2.0, w, t),
    ];
    for (bit, rect) in segments.into_iter().enumerate() {
        if pattern & (1 << bit) != 0 {
            draw.fill_rect(rect, DIGIT_COLOR);
        }
    }
}

/// Date and time in the bottom-right corner. The year always reads 2007.
pub fn timestamp<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, now: OsdTime) {
    draw.debug_marker(marker::TIMESTAMP);

    let x = view.w() - 240.0;
    let y = view.h() - 30.0;
    draw.fill_rect(Rect::new(x - 5.0, y - 5.0, 235.0, 24.0), Color::BLACK.with_alpha(0.5));

    let digits = now.digits();
    let mut dx = x;
    for cell in TIMESTAMP_LAYOUT {
        match cell {
            Cell::Digit(index) => {
                digit(draw, dx, y, DIGIT_SIZE, digits[index]);
                dx += 10.0;
            }
            Cell::Dash => {
                draw.fill_rect(Rect::new(dx + 2.0, y + 5.0, 4.0, 2.0), DIGIT_COLOR);
                dx += 10.0;
            }
            Cell::Colon => {
                draw.fill_rect(Rect::new(dx + 2.0, y + 3.0, 2.0, 2.0), DIGIT_COLOR);
                draw.fill_rect(Rect::new(dx + 2.0, y + 8.0, 2.0, 2.0), DIGIT_COLOR);
                dx += 8.0;
            }
            Cell::Space => dx += 10.0,
        }
    }
}

/// Battery outline with a charge bar. Red and blinking when low.
pub fn battery_gauge<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    level: f32,
    time: f32,
) {
    draw.debug_marker(marker::BATTERY);

    let x = view.w() - 60.0;
    let y = 20.0;
    let (width, height) = (40.0, 16.0);

    let low = level < BATTERY_LOW_THRESHOLD;
    let blink = if low && time.rem_euclid(BATTERY_BLINK_SPEED) >= BATTERY_BLINK_SPEED * 0.5 {
        0.3
    } else {
        1.0
    };

    let outline = Rect::new(x, y, width, height);
    draw.fill_rect(outline, Color::WHITE.with_alpha(0.8 * blink));
    draw.fill_rect(outline.inset(2.0), Color::BLACK);
    draw.fill_rect(Rect::new(x + width, y + 4.0, 4.0, 8.0), Color::WHITE.with_alpha(0.8 * blink));

    let fill = if low {
        Color::RED
    } else if level < 0.5 {
        Color::YELLOW
    } else {
        Color::GREEN
    };
    draw.fill_rect(
        Rect::new(x + 3.0, y + 3.0, level * (width - 6.0), height - 6.0),
        fill.with_alpha(0.9 * blink),
    );
}

/// Loop progress across the top edge with ticks at every 10 s.
pub fn debug_bar<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, loop_time: f32) {
    draw.debug_marker(marker::DEBUG);

    let progress = (loop_time / LOOP_SECONDS).clamp(0.0, 1.0);
    draw.fill_rect(Rect::new(0.0, 0.0, view.w() * progress, 3.0), Color::WHITE.with_alpha(0.6));
    for tick in 1..5 {
        let tx = view.w() * tick as f32 / 5.0;
        draw.line((tx, 0.0), (tx, 6.0), Color::YELLOW.with_alpha(0.8));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcrfx_draw::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_digit_segment_counts() {
        let expected = [6, 2, 5, 5, 4, 5, 6, 3, 7, 6];
        for (value, count) in expected.into_iter().enumerate() {
            let mut canvas = RecordingCanvas::new();
            digit(&mut canvas, 0.0, 0.0, 12.0, value as u8);
            assert_eq!(canvas.primitive_count(), count, "digit {value}");
        }

        let mut canvas = RecordingCanvas::new();
        digit(&mut canvas, 0.0, 0.0, 12.0, 10);
        assert_eq!(canvas.primitive_count(), 0);
    }

    #[test]
    fn test_rec_blink() {
        let alpha_at = |time: f32| {
            let mut canvas = RecordingCanvas::new();
            rec_indicator(&mut canvas, time);
            canvas.commands()[1].color().unwrap().a
        };
        assert_eq!(alpha_at(0.5), 1.0);
        assert_eq!(alpha_at(1.5), 0.3);
        assert_eq!(alpha_at(2.2), 1.0);
    }

    #[test]
    fn test_rec_primitive_count() {
        let mut canvas = RecordingCanvas::new();
        rec_indicator(&mut canvas, 0.0);
        // 16-slice lamp, plate, inner plate, 12 strokes.
        assert_eq!(canvas.primitive_count(), 16 + 2 + 12);
    }

    #[test]
    fn test_timestamp_layout() {
        let mut canvas = RecordingCanvas::new();
        timestamp(&mut canvas, Viewport::new(1920, 1080), OsdTime::new(8, 8, 8, 8, 8));

        // 08-08-2007 08:08:08 is seven zeros, five eights, a two and a seven,
        // plus the background, 2 dashes and 2 colons of 2 dots.
        let segments = 7 * 6 + 5 * 7 + 5 + 3;
        assert_eq!(canvas.primitive_count(), 1 + segments + 2 + 4);
        let DrawCommand::Rect { rect, .. } = canvas.section(marker::TIMESTAMP)[0] else {
            panic!("expected background");
        };
        assert_eq!(rect, Rect::new(1675.0, 1045.0, 235.0, 24.0));
    }

    #[test]
    fn test_battery_colors() {
        let fill_at = |level: f32, time: f32| {
            let mut canvas = RecordingCanvas::new();
            battery_gauge(&mut canvas, Viewport::new(800, 600), level, time);
            canvas.commands().last().unwrap().color().unwrap()
        };
        assert_eq!(fill_at(0.75, 0.0), Color::GREEN.with_alpha(0.9));
        assert_eq!(fill_at(0.3, 0.0), Color::YELLOW.with_alpha(0.9));
        assert_eq!(fill_at(0.1, 0.1), Color::RED.with_alpha(0.9));
        let dim = fill_at(0.1, 0.3);
        assert!((dim.a - 0.27).abs() < 1e-6);
    }
}
