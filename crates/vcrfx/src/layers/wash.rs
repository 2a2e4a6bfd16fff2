//! Full-screen washes: desaturation, flicker, chroma splits, night vision.
//!
//! None of these read the framebuffer. Darkening uses a multiplicative
//! blend; everything else is an alpha-blended quad over the scene.

use vcrfx_draw::{BlendMode, Color, ImmediateDraw};

use super::{marker, Viewport};

/// Warm tint mixed into the desaturation wash.
pub const SEPIA_TINT: f32 = 0.05;
/// Peak alpha of the CCTV flicker.
pub const FLICKER_INTENSITY: f32 = 0.15;
/// CCTV flicker frequency (rad/s).
pub const FLICKER_SPEED: f32 = 8.0;
/// Color-separation offset as a fraction of the viewport width.
pub const SPIKE_COLOR_SHIFT: f32 = 0.02;
/// Chromatic aberration offset at full intensity (pixels).
pub const CHROMATIC_AMOUNT: f32 = 3.0;
/// Night-vision multiply tint.
pub const NIGHT_VISION_TINT: Color = Color::rgb(0.2, 1.0, 0.2);
/// Night-vision additive glow alpha.
pub const NIGHT_VISION_BLOOM: f32 = 0.1;
/// Extra noise dots in night vision at noise multiplier 1.
pub const NIGHT_VISION_NOISE: f32 = 30.0;

const SEPIA: Color = Color::rgb(0.3, 0.2, 0.1);

/// Darkens and greys out the scene. No-op at intensity 0.01 or below.
///
/// The multiply pass must come first: the grey and sepia passes are
/// blended over the already darkened image.
pub fn desaturation<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    intensity: f32,
    sepia: f32,
) -> bool {
    if intensity <= 0.01 {
        return false;
    }
    draw.debug_marker(marker::DESATURATION);

    let screen = view.rect();
    let darken = (1.0 - intensity * 0.5).max(0.5);

    draw.set_blend(BlendMode::Multiply);
    draw.fill_rect(screen, Color::grey(darken, 1.0));

    draw.set_blend(BlendMode::Alpha);
    draw.fill_rect(screen, Color::grey(0.5, intensity * 0.3));

    if sepia > 0.01 {
        draw.fill_rect(screen, SEPIA.with_alpha(sepia * intensity * 0.2));
    }
    true
}

/// Brightness wash from two beating sine waves.
pub fn flicker<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, intensity: f32, time: f32) {
    draw.debug_marker(marker::FLICKER);

    let mut level = (time * FLICKER_SPEED).sin() * 0.5 + 0.5;
    level += (time * FLICKER_SPEED * 2.3).sin() * 0.3;
    level *= FLICKER_INTENSITY * intensity;

    draw.fill_rect(view.rect(), Color::WHITE.with_alpha(level));
}

/// Red/cyan split used during distortion spikes.
pub fn color_separation<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport, intensity: f32) {
    draw.debug_marker(marker::COLOR_SEPARATION);

    let offset = intensity * view.w() * SPIKE_COLOR_SHIFT;
    let screen = view.rect();
    draw.fill_rect(screen.offset(-offset, 0.0), Color::RED.with_alpha(0.03 * intensity));
    draw.fill_rect(screen.offset(offset, 0.0), Color::CYAN.with_alpha(0.03 * intensity));
}

/// Red/blue split that follows screen shake.
pub fn chromatic_aberration<D: ImmediateDraw + ?Sized>(
    draw: &mut D,
    view: Viewport,
    intensity: f32,
) {
    draw.debug_marker(marker::CHROMATIC_ABERRATION);

    let offset = CHROMATIC_AMOUNT * intensity;
    let screen = view.rect();
    draw.fill_rect(screen.offset(-offset, 0.0), Color::RED.with_alpha(0.05 * intensity));
    draw.fill_rect(screen.offset(offset, 0.0), Color::BLUE.with_alpha(0.05 * intensity));
}

/// Green phosphor tint plus a faint additive glow.
pub fn night_vision<D: ImmediateDraw + ?Sized>(draw: &mut D, view: Viewport) {
    draw.debug_marker(marker::NIGHT_VISION);

    let screen = view.rect();
    draw.set_blend(BlendMode::Multiply);
    draw.fill_rect(screen, NIGHT_VISION_TINT);

    draw.set_blend(BlendMode::Additive);
    draw.fill_rect(screen, NIGHT_VISION_TINT.with_alpha(NIGHT_VISION_BLOOM));

    draw.set_blend(BlendMode::Alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcrfx_draw::{DrawCommand, RecordingCanvas};

    const VIEW: Viewport = Viewport::new(640, 480);

    #[test]
    fn test_desaturation_guard() {
        let mut canvas = RecordingCanvas::new();
        assert!(!desaturation(&mut canvas, VIEW, 0.01, SEPIA_TINT));
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_desaturation_pass_order() {
        let mut canvas = RecordingCanvas::new();
        assert!(desaturation(&mut canvas, VIEW, 1.0, SEPIA_TINT));

        let blends: Vec<_> = canvas
            .section(marker::DESATURATION)
            .iter()
            .filter_map(DrawCommand::blend)
            .collect();
        assert_eq!(blends, vec![BlendMode::Multiply, BlendMode::Alpha, BlendMode::Alpha]);

        let darken = canvas.section(marker::DESATURATION)[0].color().unwrap();
        assert_eq!(darken.r, 0.5);
        assert_eq!(canvas.state().blend, BlendMode::Alpha);
    }

    #[test]
    fn test_sepia_skipped_when_small() {
        let mut canvas = RecordingCanvas::new();
        desaturation(&mut canvas, VIEW, 0.5, 0.0);
        assert_eq!(canvas.primitive_count(), 2);
    }

    #[test]
    fn test_night_vision_restores_alpha_blend() {
        let mut canvas = RecordingCanvas::new();
        night_vision(&mut canvas, VIEW);
        assert_eq!(canvas.state().blend, BlendMode::Alpha);
        assert_eq!(canvas.primitive_count(), 2);
    }

    #[test]
    fn test_color_separation_offsets() {
        let mut canvas = RecordingCanvas::new();
        color_separation(&mut canvas, VIEW, 1.0);
        match canvas.commands()[1] {
            DrawCommand::Rect { rect, .. } => assert!((rect.x + 12.8).abs() < 1e-4),
            other => panic!("unexpected {other:?}"),
        }
    }
}
