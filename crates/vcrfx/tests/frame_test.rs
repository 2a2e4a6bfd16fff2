//! # Frame Integration Test
//!
//! Whole frames through the recording and batching backends: layer
//! selection per mode and quality, graphics-state restoration, determinism
//! and the configuration archive.

use vcrfx::config::{VCR_TIMESTAMP, VCR_TRACKING_LINES};
use vcrfx::layers::marker;
use vcrfx::{CvarStore, EffectMode, FixedClock, Layer, MemoryCvars, OsdTime, VcrEffect};
use vcrfx_draw::{
    BlendMode, Color, DrawState, ImmediateDraw, MatrixStack, QuadBatcher, RecordingCanvas,
};

fn effect() -> VcrEffect<MemoryCvars, FixedClock> {
    let mut effect = VcrEffect::with_clock(
        MemoryCvars::new(),
        FixedClock(OsdTime::new(3, 14, 15, 9, 26)),
    );
    effect.init();
    effect
}

/// Test: CCTV at High quality, 1080p, 15 s into the cycle.
#[test]
fn test_cctv_high_frame() {
    let mut effect = effect();
    effect.set_mode(1);
    effect.set_quality(2);

    let mut canvas = RecordingCanvas::new();
    let report = effect.draw(&mut canvas, 1920, 1080, 15.0);

    assert!(report.drawn);
    assert_eq!(report.params.desaturation, 0.08);
    assert!(report.params.show_tracking);

    let layers = report.layers;
    assert!(layers.contains(Layer::Desaturation));
    assert!(layers.contains(Layer::Cctv));
    assert!(layers.contains(Layer::Scanlines));
    assert!(layers.contains(Layer::Tracking));
    assert!(layers.contains(Layer::Timestamp));
    assert!(!layers.contains(Layer::RecIndicator));
    assert!(!layers.contains(Layer::Battery));

    assert!(canvas.has_marker(marker::FLICKER));
    assert!(canvas.has_marker(marker::CCTV));
    assert!(!canvas.has_marker(marker::REC));
    assert!(canvas.is_balanced());
}

/// Test: every mode leaves color, texture, blend, capability flags and both
/// matrices exactly as the host left them.
#[test]
fn test_state_restored_in_every_mode() {
    let host = DrawState {
        color: Color::rgba(0.2, 0.4, 0.6, 1.0),
        texture: Some(7),
        blend: BlendMode::Additive,
        blending: true,
        depth_test: true,
        cull_face: false,
        texturing: true,
        lighting: true,
    };

    for mode in 0..4 {
        let mut effect = effect();
        effect.set_mode(mode);
        effect.force_distortion();
        effect.force_static();
        effect.force_tape_damage();

        let mut canvas = RecordingCanvas::with_state(host);
        canvas.load_ortho(800.0, 600.0);
        canvas.translate(12.0, -3.0);
        let projection = canvas.matrix(MatrixStack::Projection);
        let modelview = canvas.matrix(MatrixStack::ModelView);

        for frame in 0..3 {
            let report = effect.draw(&mut canvas, 800, 600, 21.0 + frame as f32 * 0.016);
            assert!(report.drawn);
            assert_eq!(canvas.state(), host, "mode {mode} frame {frame}");
            assert_eq!(canvas.matrix(MatrixStack::Projection), projection);
            assert_eq!(canvas.matrix(MatrixStack::ModelView), modelview);
            assert!(canvas.is_balanced(), "mode {mode} frame {frame}");
        }
        assert!(canvas.primitive_count() > 0);
    }
}

/// Test: night vision tints with multiply then glows additively, and has no
/// timestamp.
#[test]
fn test_night_vision_frame() {
    let mut effect = effect();
    effect.set_mode(3);
    assert_eq!(effect.mode(), EffectMode::NightVision);

    let mut canvas = RecordingCanvas::new();
    let report = effect.draw(&mut canvas, 1280, 720, 5.0);

    assert!(report.layers.contains(Layer::NightVision));
    assert!(!report.layers.contains(Layer::Timestamp));
    assert!(!report.layers.contains(Layer::RecIndicator));

    let tint = canvas.section(marker::NIGHT_VISION);
    assert!(tint.iter().any(|c| c.blend() == Some(BlendMode::Multiply)));
    assert!(tint.iter().any(|c| c.blend() == Some(BlendMode::Additive)));
}

/// Test: Low quality thins the noise but keeps every toggled-on OSD layer.
#[test]
fn test_low_quality_frame() {
    let mut effect = effect();
    effect.set_quality(0);

    let mut canvas = RecordingCanvas::new();
    let report = effect.draw(&mut canvas, 1280, 720, 15.0);

    assert!(report.params.show_tracking);
    assert!(report.layers.contains(Layer::RecIndicator));
    assert!(report.layers.contains(Layer::Battery));
    assert!(report.layers.contains(Layer::Tracking));
    assert!(report.layers.contains(Layer::Timestamp));
    assert!(!report.layers.contains(Layer::Grain));
    assert!(canvas.has_marker(marker::TRACKING));
    assert!(canvas.has_marker(marker::TIMESTAMP));
}

/// Test: the tracking and timestamp toggles switch their layers off.
#[test]
fn test_osd_toggles_off() {
    let mut effect = effect();
    effect.set_quality(2);
    assert!(effect.cvars_mut().set_value(VCR_TRACKING_LINES, 0.0));
    assert!(effect.cvars_mut().set_value(VCR_TIMESTAMP, 0.0));

    let mut canvas = RecordingCanvas::new();
    let report = effect.draw(&mut canvas, 1280, 720, 15.0);

    assert!(report.params.show_tracking);
    assert!(!report.layers.contains(Layer::Tracking));
    assert!(!report.layers.contains(Layer::Timestamp));
}

/// Test: the same frame times replay the same geometry.
#[test]
fn test_replay_is_deterministic() {
    let run = || {
        let mut effect = effect();
        effect.set_mode(2);
        let mut canvas = RecordingCanvas::new();
        let mut t = 0.0;
        for _ in 0..400 {
            effect.draw(&mut canvas, 640, 360, t);
            t += 1.0 / 15.0;
        }
        canvas
    };

    let a = run();
    let b = run();
    assert_eq!(a.commands().len(), b.commands().len());
    assert!(a.commands() == b.commands());
}

/// Test: found footage spikes on its interval, VCR never does.
#[test]
fn test_spikes_only_in_found_footage() {
    let count_spikes = |mode: i32| {
        let mut effect = effect();
        effect.set_mode(mode);
        let mut canvas = RecordingCanvas::new();
        let mut spikes = 0;
        let mut t = 0.0;
        while t < 45.0 {
            canvas.clear();
            if effect.draw(&mut canvas, 320, 240, t).params.distortion {
                spikes += 1;
            }
            t += 0.05;
        }
        spikes
    };

    assert!(count_spikes(2) > 0);
    assert_eq!(count_spikes(0), 0);
}

/// Test: the batching backend produces triangle lists and restores its
/// binding after the frame.
#[test]
fn test_batched_frame() {
    let mut effect = effect();
    effect.set_mode(3);

    let mut batcher = QuadBatcher::new();
    batcher.begin_frame();
    let binding = batcher.binding();
    effect.draw(&mut batcher, 1920, 1080, 31.0);

    assert!(!batcher.vertices().is_empty());
    assert_eq!(batcher.vertices().len() % 3, 0);
    assert_eq!(batcher.binding(), binding);
    assert!(batcher.batches().iter().any(|b| b.blend == BlendMode::Multiply));
    let total: u32 = batcher.batches().iter().map(|b| b.count).sum();
    assert_eq!(total as usize, batcher.vertices().len());
}

/// Test: archived settings survive a save and a load into a fresh store.
#[test]
fn test_archive_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vcrfx.toml");

    let mut effect = effect();
    effect.set_mode(2);
    effect.set_quality(1);
    effect.cvars_mut().set_string("vcr_desaturation", "0.9");
    effect.cvars().save_archive(&path).unwrap();

    let mut restored = VcrEffect::with_clock(
        MemoryCvars::with_defaults(),
        FixedClock(OsdTime::new(1, 1, 0, 0, 0)),
    );
    let count = restored.cvars_mut().load_archive(&path).unwrap();
    restored.init();

    assert_eq!(count, 7);
    assert_eq!(restored.mode(), EffectMode::FoundFootage);
    assert_eq!(restored.quality().level(), 1);
    // Not archived, so the default stands.
    assert_eq!(
        restored.cvars().entry("vcr_desaturation").map(|e| e.value),
        Some(0.5)
    );
}

/// Test: a malformed archive file is reported, not applied.
#[test]
fn test_archive_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "cvars = [ not toml").unwrap();

    let mut cvars = MemoryCvars::with_defaults();
    let err = cvars.load_archive(&path).unwrap_err();
    assert!(matches!(err, vcrfx::ConfigError::Parse(_)));
    assert_eq!(cvars.entry("vcr_mode").map(|e| e.value), Some(0.0));
}
