// Desktop launcher binary — no public API to document.
#![allow(missing_docs)]

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use watch_core::config::{
    CANVAS_SIZE, DEFAULT_RADIUS, DEFAULT_UPDATE_INTERVAL_SECS, RING_SCALE, WINDOW_TITLE,
};
use watch_core::{
    AlarmTime, FaceKind, RunOptions, Shutdown, SystemClock, Theme, TimeFormat, UpdateInterval,
    Watch, WatchConfig,
};
use watch_emulator::{EmulatorCanvas, EmulatorConfig};

#[derive(Parser, Debug)]
#[command(name = "watch")]
#[command(about = "Analog or digital desktop watch", long_about = None)]
#[command(version)]
struct Cli {
    /// Face variant: analog or digital
    #[arg(long, default_value = "analog")]
    face: FaceKind,

    /// light, dark, or six comma separated colors:
    /// background,face,digit,hour,minute,second
    #[arg(long, default_value = "light")]
    theme: Theme,

    /// Dial radius in pixels (analog)
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: f32,

    /// 24h or 12h (digital)
    #[arg(long, default_value = "24h")]
    time_format: TimeFormat,

    /// Seconds between refreshes
    #[arg(long, default_value_t = DEFAULT_UPDATE_INTERVAL_SECS)]
    interval: f64,

    /// Alarm time, repeatable
    #[arg(long = "alarm", value_name = "HH:MM[:SS]")]
    alarms: Vec<AlarmTime>,

    /// Run without a window (CI, screenshots)
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks
    #[arg(long)]
    frames: Option<u64>,

    /// Save the last frame as PNG on exit
    #[arg(long, value_name = "PATH")]
    screenshot: Option<PathBuf>,

    /// Window upscaling factor
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Square canvas edge in pixels
    #[arg(long, default_value_t = CANVAS_SIZE)]
    size: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = WatchConfig {
        face: cli.face,
        theme: cli.theme,
        radius: cli.radius,
        time_format: cli.time_format,
        alarms: cli.alarms.clone(),
    };
    config.validate()?;
    let interval = UpdateInterval::from_secs_f64(cli.interval)?;

    #[allow(clippy::cast_precision_loss)]
    let half = cli.size as f32 / 2.0;
    if config.face == FaceKind::Analog && config.radius * RING_SCALE > half {
        tracing::warn!(
            radius = config.radius,
            size = cli.size,
            "dial does not fit the canvas and will be clipped"
        );
    }

    let emulator_config = EmulatorConfig::square(cli.size).with_scale(cli.scale);
    let canvas = if cli.headless {
        EmulatorCanvas::headless(&emulator_config)
    } else {
        EmulatorCanvas::windowed(&emulator_config, WINDOW_TITLE)?
    };

    let shutdown = Shutdown::new();
    spawn_ctrl_c_listener(shutdown.clone())?;

    let mut watch = Watch::from_config(canvas, SystemClock, &config, ring_bell)?;
    let mut options = RunOptions::new(interval);
    if let Some(frames) = cli.frames {
        options = options.with_max_ticks(frames);
    }

    tracing::info!(
        face = ?config.face,
        alarms = config.alarms.len(),
        headless = cli.headless,
        "starting watch"
    );
    let summary = watch.run(options, &shutdown)?;
    tracing::info!(ticks = summary.ticks, reason = ?summary.stop_reason, "bye");

    if let Some(path) = cli.screenshot {
        watch
            .canvas()
            .screenshot(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise log at info.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Raise `shutdown` on Ctrl-C from a dedicated thread.
fn spawn_ctrl_c_listener(shutdown: Shutdown) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building signal runtime")?;

    std::thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("Ctrl-C received, stopping");
                        shutdown.request();
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for Ctrl-C"),
                }
            });
        })
        .context("spawning Ctrl-C listener")?;
    Ok(())
}

/// Terminal bell on stderr.
fn ring_bell() {
    let mut stderr = std::io::stderr();
    stderr.write_all(b"\x07").ok();
    stderr.flush().ok();
}
