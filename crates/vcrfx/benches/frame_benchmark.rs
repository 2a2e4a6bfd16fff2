//! Benchmark for full overlay frames.
//!
//! TARGET: a 1080p CCTV frame well under 1 ms of CPU
//!
//! Run with: cargo bench --package vcrfx --bench frame_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vcrfx::{FixedClock, MemoryCvars, OsdTime, TapeRng, VcrEffect};
use vcrfx_draw::QuadBatcher;

fn effect(mode: i32) -> VcrEffect<MemoryCvars, FixedClock> {
    let mut effect = VcrEffect::with_clock(
        MemoryCvars::with_defaults(),
        FixedClock(OsdTime::new(10, 31, 23, 59, 59)),
    );
    effect.init();
    effect.set_mode(mode);
    effect
}

fn benchmark_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("tape_rng");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("10k_floats", |b| {
        let mut rng = TapeRng::new(42);
        b.iter(|| {
            let mut sum = 0.0f32;
            for _ in 0..10_000 {
                sum += rng.next_float();
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn benchmark_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay_frame_1080p");

    for (name, mode) in [("vcr", 0), ("cctv", 1), ("found_footage", 2), ("night_vision", 3)] {
        group.bench_function(name, |b| {
            let mut effect = effect(mode);
            let mut batcher = QuadBatcher::new();
            let mut time = 0.0f32;
            b.iter(|| {
                time += 1.0 / 60.0;
                batcher.begin_frame();
                let report = effect.draw(&mut batcher, 1920, 1080, black_box(time));
                black_box((report, batcher.vertex_bytes().len()))
            });
        });
    }

    group.finish();
}

fn benchmark_static_burst(c: &mut Criterion) {
    c.bench_function("static_burst_1080p", |b| {
        let mut effect = effect(2);
        let mut batcher = QuadBatcher::new();
        let mut time = 0.0f32;
        b.iter(|| {
            time += 1.0 / 60.0;
            effect.force_static();
            batcher.begin_frame();
            black_box(effect.draw(&mut batcher, 1920, 1080, time))
        });
    });
}

criterion_group!(benches, benchmark_rng, benchmark_frames, benchmark_static_burst);
criterion_main!(benches);
