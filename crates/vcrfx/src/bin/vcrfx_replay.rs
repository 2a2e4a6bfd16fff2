//! Replays the overlay offline through the batching backend.
//!
//! Run with: cargo run --package vcrfx --features replay --bin vcrfx_replay -- --mode 1 --frames 600

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use vcrfx::{Layer, MemoryCvars, VcrEffect};
use vcrfx_draw::QuadBatcher;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Frames to render
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frames per second of the simulated clock
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Time of the first frame in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f32,

    /// Effect mode (0 vcr, 1 cctv, 2 found footage, 3 night vision)
    #[arg(long)]
    mode: Option<i32>,

    /// Quality level (0-2)
    #[arg(long)]
    quality: Option<i32>,

    /// Viewport width
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Viewport height
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Battery charge (0-1)
    #[arg(long)]
    battery: Option<f32>,

    /// Event to force on the first frame
    #[arg(long, value_enum)]
    force: Vec<ForcedEvent>,

    /// Configuration archive to load before the run
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Write the configuration archive here after the run
    #[arg(long)]
    save_archive: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum ForcedEvent {
    Distortion,
    Cctv,
    Static,
    TapeDamage,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Per-run counters.
#[derive(Debug, Default)]
struct ReplayStats {
    frames_drawn: u32,
    total_vertices: u64,
    peak_vertices: usize,
    peak_batches: usize,
    tracking_frames: u32,
    cctv_frames: u32,
    fault_frames: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(
            cli.log_level
                .to_string()
                .parse()
                .unwrap_or_else(|_| tracing::level_filters::LevelFilter::INFO.into()),
        )
        .from_env_lossy();
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut cvars = MemoryCvars::with_defaults();
    if let Some(path) = &cli.archive {
        match cvars.load_archive(path) {
            Ok(restored) => info!("Restored {} settings from {:?}", restored, path),
            Err(e) => {
                error!("Failed to load archive {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut effect = VcrEffect::new(cvars);
    effect.init();
    if let Some(mode) = cli.mode {
        effect.set_mode(mode);
    }
    if let Some(quality) = cli.quality {
        effect.set_quality(quality);
    }
    if let Some(level) = cli.battery {
        effect.set_battery(level);
    }
    for event in &cli.force {
        match event {
            ForcedEvent::Distortion => effect.force_distortion(),
            ForcedEvent::Cctv => effect.force_cctv(),
            ForcedEvent::Static => effect.force_static(),
            ForcedEvent::TapeDamage => effect.force_tape_damage(),
        }
    }

    info!(
        "Replaying {} frames at {} fps, {}x{}, mode {:?}, quality {:?}",
        cli.frames,
        cli.fps,
        cli.width,
        cli.height,
        effect.mode(),
        effect.quality()
    );

    let step = 1.0 / cli.fps.max(1.0);
    let mut batcher = QuadBatcher::new();
    let mut stats = ReplayStats::default();

    for frame in 0..cli.frames {
        let time = cli.start + frame as f32 * step;
        batcher.begin_frame();
        let report = effect.draw(&mut batcher, cli.width, cli.height, time);
        if !report.drawn {
            continue;
        }

        stats.frames_drawn += 1;
        stats.total_vertices += batcher.vertices().len() as u64;
        stats.peak_vertices = stats.peak_vertices.max(batcher.vertices().len());
        stats.peak_batches = stats.peak_batches.max(batcher.batches().len());
        if report.layers.contains(Layer::Tracking) {
            stats.tracking_frames += 1;
        }
        if report.layers.contains(Layer::Cctv) {
            stats.cctv_frames += 1;
        }
        if report.layers.contains(Layer::StaticBurst) || report.layers.contains(Layer::TapeDamage) {
            stats.fault_frames += 1;
        }
    }

    let average = if stats.frames_drawn > 0 {
        stats.total_vertices / u64::from(stats.frames_drawn)
    } else {
        0
    };
    info!("Frames drawn: {}", stats.frames_drawn);
    info!(
        "Vertices: {} avg, {} peak ({} KiB upload)",
        average,
        stats.peak_vertices,
        stats.peak_vertices * std::mem::size_of::<vcrfx_draw::OverlayVertex>() / 1024
    );
    info!("Peak batches per frame: {}", stats.peak_batches);
    info!(
        "Frames with tracking band: {}, CCTV: {}, tape faults: {}",
        stats.tracking_frames, stats.cctv_frames, stats.fault_frames
    );

    if let Some(path) = &cli.save_archive {
        if let Err(e) = effect.cvars().save_archive(path) {
            error!("Failed to save archive {:?}: {}", path, e);
            return ExitCode::FAILURE;
        }
        info!("Saved archive to {:?}", path);
    }

    ExitCode::SUCCESS
}
