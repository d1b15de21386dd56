//! DiceRoller — host entry point.
//!
//! Runs the dice screen against host adapters: a simulated accelerometer
//! fed from a recorded trace, a JSON-file preference store, and the
//! console logger.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │  SimulatedSensorManager  KvStore  HostRandom  LogEventSink   │
//! │  ─────────────────── Port Trait Boundary ─────────────────── │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │         AppService (ShakeDetector · Dice)              │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info, warn};

use diceroller::adapters::console_log;
use diceroller::adapters::kv_store::KvStore;
use diceroller::adapters::log_sink::LogEventSink;
use diceroller::adapters::random::HostRandom;
use diceroller::adapters::replay;
use diceroller::adapters::sim_sensor::SimulatedSensorManager;
use diceroller::app::commands::AppCommand;
use diceroller::app::ports::ConfigPort;
use diceroller::app::service::AppService;

#[derive(Debug, Parser)]
#[command(name = "diceroller")]
#[command(about = "Roll a die by button or by replaying an accelerometer shake trace")]
struct Cli {
    /// JSON-lines accelerometer trace to replay (`{"t":ns,"x":..,"y":..,"z":..}`).
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Shake threshold (sum-of-axes delta, m/s²). Overrides the stored config.
    #[arg(long)]
    threshold: Option<f32>,

    /// Minimum milliseconds between shakes. Overrides the stored config.
    #[arg(long = "min-interval-ms")]
    min_interval_ms: Option<u64>,

    /// Preference file holding the roll counter and config.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Button rolls to perform before replaying the trace.
    #[arg(long, default_value_t = 0)]
    rolls: u32,

    /// Pretend the device has no accelerometer.
    #[arg(long)]
    no_accelerometer: bool,

    /// Log per-sample filter decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    console_log::init(level).context("installing console logger")?;
    info!("DiceRoller v{}", env!("CARGO_PKG_VERSION"));

    // ── Storage + config ──────────────────────────────────────
    let mut store = match &cli.store {
        Some(path) => KvStore::open(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("opening store {}", path.display()))?,
        None => KvStore::new(),
    };
    let mut config = store.load().map_err(|e| anyhow::anyhow!("loading config: {e}"))?;
    if let Some(threshold) = cli.threshold {
        config.shake_threshold = threshold;
    }
    if let Some(ms) = cli.min_interval_ms {
        config.shake_min_interval_ns = ms.saturating_mul(1_000_000);
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    if cli.threshold.is_some() || cli.min_interval_ms.is_some() {
        store
            .save(&config)
            .map_err(|e| anyhow::anyhow!("saving config: {e}"))?;
    }

    let samples = match &cli.trace {
        Some(path) => replay::load_trace(path)
            .with_context(|| format!("loading trace {}", path.display()))?,
        None => Vec::new(),
    };

    // ── Adapters ──────────────────────────────────────────────
    let accelerometers = usize::from(!cli.no_accelerometer);
    let sensors = SimulatedSensorManager::new(accelerometers);
    let mut sink = LogEventSink::new();
    let mut rng = HostRandom::new();
    let mut app = AppService::new(config, sensors);

    // ── Screen lifecycle ──────────────────────────────────────
    app.on_create(None, &mut sink);
    app.on_start(&store, &mut sink)?;
    app.on_resume(&mut sink);

    let button_rolls = if cli.rolls == 0 && samples.is_empty() {
        1
    } else {
        cli.rolls
    };
    for _ in 0..button_rolls {
        app.handle_command(AppCommand::Roll, &mut rng, &mut sink)?;
    }

    let mut shake_rolls = 0;
    for sample in samples {
        if !app.sensors_mut().inject(sample) {
            warn!("Accelerometer not registered, trace ignored");
            break;
        }
        shake_rolls += app.pump_sensors(&mut rng, &mut sink);
    }

    app.on_pause(&mut sink);
    let saved = app.save_instance_state();
    app.on_stop(&mut store)?;

    let overwritten = app.sensors_mut().overwritten();
    if overwritten > 0 {
        warn!("{} samples lost to FIFO overflow", overwritten);
    }

    info!(
        "Done: face={} rolls={} (shake rolls this run: {}) starts={}",
        app.last_face().map_or_else(|| "-".to_string(), |f| f.to_string()),
        app.roll_count(),
        shake_rolls,
        saved.start_count
    );
    Ok(())
}
