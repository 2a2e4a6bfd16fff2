//! # Control Surface Integration Test
//!
//! Clamping, toggles, forced triggers and the no-op guards of [`VcrEffect`].

use vcrfx::config::{VCR_ENABLED, VCR_MODE, VCR_QUALITY};
use vcrfx::{
    CvarStore, EffectMode, FixedClock, Layer, MemoryCvars, OsdTime, Quality, VcrEffect,
};
use vcrfx_draw::RecordingCanvas;

fn effect() -> VcrEffect<MemoryCvars, FixedClock> {
    let mut effect = VcrEffect::with_clock(
        MemoryCvars::new(),
        FixedClock(OsdTime::new(10, 31, 23, 59, 58)),
    );
    effect.init();
    effect
}

/// Test: quality and mode are clamped into range and stored clamped.
#[test]
fn test_setters_clamp() {
    let mut effect = effect();

    effect.set_quality(-5);
    assert_eq!(effect.quality(), Quality::Low);
    assert_eq!(effect.cvars().integer(VCR_QUALITY), Some(0));

    effect.set_quality(99);
    assert_eq!(effect.quality(), Quality::High);
    assert_eq!(effect.cvars().integer(VCR_QUALITY), Some(2));

    effect.set_mode(-1);
    assert_eq!(effect.mode(), EffectMode::Vcr);
    assert_eq!(effect.cvars().integer(VCR_MODE), Some(0));

    effect.set_mode(10);
    assert_eq!(effect.mode(), EffectMode::NightVision);
    assert_eq!(effect.cvars().integer(VCR_MODE), Some(3));
}

/// Test: battery is clamped to the unit range.
#[test]
fn test_battery_clamps() {
    let mut effect = effect();

    effect.set_battery(-0.3);
    assert_eq!(effect.battery(), 0.0);

    effect.set_battery(1.7);
    assert_eq!(effect.battery(), 1.0);

    effect.set_battery(0.42);
    assert_eq!(effect.battery(), 0.42);
}

/// Test: toggling twice restores the original enable flag.
#[test]
fn test_toggle_is_symmetric() {
    let mut effect = effect();
    let before = effect.is_enabled();

    effect.toggle();
    assert_ne!(effect.is_enabled(), before);
    effect.toggle();
    assert_eq!(effect.is_enabled(), before);
    assert_eq!(effect.cvars().integer(VCR_ENABLED), Some(i32::from(before)));
}

/// Test: enable and disable are idempotent.
#[test]
fn test_enable_disable_idempotent() {
    let mut effect = effect();

    effect.disable();
    effect.disable();
    assert!(!effect.is_enabled());

    effect.enable();
    effect.enable();
    assert!(effect.is_enabled());
}

/// Test: resetting twice leaves the same state as resetting once.
#[test]
fn test_reset_is_idempotent() {
    let mut effect = effect();
    let mut canvas = RecordingCanvas::new();
    for i in 0..120 {
        effect.draw(&mut canvas, 640, 480, i as f32 * 0.25);
        canvas.clear();
    }
    effect.force_static();

    effect.reset();
    let once = effect.state().clone();
    effect.reset();
    assert_eq!(effect.state(), &once);

    assert!(!once.is_running());
    assert!(!once.has_pending_force());
    assert_eq!(once.frame_count, 0);
}

/// Test: after a reset the next frame re-anchors the cycle.
#[test]
fn test_reset_reanchors_cycle() {
    let mut effect = effect();
    let mut canvas = RecordingCanvas::new();

    effect.draw(&mut canvas, 640, 480, 12.0);
    effect.reset();
    let report = effect.draw(&mut canvas, 640, 480, 112.5);

    assert_eq!(report.params.loop_time, 0.0);
    assert_eq!(effect.state().effect_start_time, 112.5);
}

/// Test: the control surface is safe to call before init.
#[test]
fn test_calls_before_init_do_not_panic() {
    let mut effect = VcrEffect::with_clock(
        MemoryCvars::new(),
        FixedClock(OsdTime::new(1, 1, 0, 0, 0)),
    );
    effect.enable();
    effect.toggle();
    effect.set_mode(2);
    effect.set_quality(1);
    effect.reset();
    effect.force_cctv();

    // Nothing is registered yet, so the writes had nothing to land on.
    assert!(effect.cvars().is_empty());
    assert!(!effect.is_enabled());

    let mut canvas = RecordingCanvas::new();
    let report = effect.draw(&mut canvas, 640, 480, 1.0);
    assert!(!report.drawn);
    assert!(canvas.commands().is_empty());
}

/// Test: a forced trigger starts its event on the next frame and is then
/// cleared, so it fires exactly once.
#[test]
fn test_forced_triggers_consume_and_clear() {
    let mut effect = effect();
    let mut canvas = RecordingCanvas::new();

    effect.force_static();
    effect.force_tape_damage();
    effect.force_cctv();
    effect.force_distortion();
    assert!(effect.state().has_pending_force());

    let report = effect.draw(&mut canvas, 640, 480, 5.0);
    assert!(!effect.state().has_pending_force());
    assert!(report.layers.contains(Layer::StaticBurst));
    assert!(report.layers.contains(Layer::TapeDamage));
    assert!(report.layers.contains(Layer::Cctv));
    assert!(report.layers.contains(Layer::ColorSeparation));
    assert!(report.params.distortion);
    assert_eq!(effect.state().static_start_time, 5.0);

    // Long after every event has expired nothing is re-armed.
    canvas.clear();
    let later = effect.draw(&mut canvas, 640, 480, 9.0);
    assert!(!later.layers.contains(Layer::StaticBurst));
    assert!(!later.layers.contains(Layer::TapeDamage));
    assert!(!later.layers.contains(Layer::Cctv));
    assert!(!later.params.distortion);
    assert_eq!(effect.state().static_start_time, 5.0);
}

/// Test: a disabled effect leaves forced triggers pending.
#[test]
fn test_forced_trigger_waits_while_disabled() {
    let mut effect = effect();
    let mut canvas = RecordingCanvas::new();

    effect.disable();
    effect.force_static();
    effect.draw(&mut canvas, 640, 480, 2.0);
    assert!(effect.state().force_static);

    effect.enable();
    let report = effect.draw(&mut canvas, 640, 480, 2.1);
    assert!(report.layers.contains(Layer::StaticBurst));
    assert!(!effect.state().force_static);
}
