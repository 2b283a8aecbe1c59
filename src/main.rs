//! FermentMon main entry point
//!
//! Hexagonal architecture with a single blocking sampling task.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedSensor   StatusDisplay   SerialLogSink  HostTime     │
//! │  (SensorPort)      (DisplayPort)   (EventSink)    (DelayPort)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           SamplingLoop (pure logic)                    │    │
//! │  │  acquire · classify · dispatch · sleep                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `fermentmon [config.json]`. Log level via `FERMENTMON_LOG`.
#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use fermentmon::adapters::config_file::JsonConfigFile;
use fermentmon::adapters::console_logger;
use fermentmon::adapters::display::{AsciiPanel, StatusDisplay};
use fermentmon::adapters::log_sink::SerialLogSink;
use fermentmon::adapters::time::HostTimeAdapter;
use fermentmon::app::ports::{ConfigError, ConfigPort};
use fermentmon::app::service::SamplingLoop;
use fermentmon::config::MonitorConfig;
use fermentmon::sensors::SimulatedSensor;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    console_logger::init().context("logger init failed")?;
    info!("FermentMon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config (or defaults) ──────────────────────────
    let store = JsonConfigFile::new(std::env::args_os().nth(1).map(PathBuf::from));
    let config = match store.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            warn!(
                "Config file {} not found, using defaults",
                store.path().map_or_else(String::new, |p| p.display().to_string())
            );
            MonitorConfig::default()
        }
        Err(e) => bail!("config rejected: {e}"),
    };
    info!(
        "Thresholds: active>={}ppm vent>={}ppm good={:.1}..={:.1}C dry<{:.1}%RH every {}ms",
        config.co2_active_min,
        config.co2_vent,
        config.temp_good_min,
        config.temp_good_max,
        config.humidity_low_warn,
        config.poll_interval_ms
    );

    // ── 3. Construct adapters ─────────────────────────────────
    let mut sensor = SimulatedSensor::new().with_miss_every(17);
    let mut display = StatusDisplay::new(AsciiPanel::new());
    let mut sink = SerialLogSink::new(std::io::stdout());
    let mut clock = HostTimeAdapter::new();

    // ── 4. Startup (fatal on handshake failure) ───────────────
    let mut app = SamplingLoop::new(config);
    app.start(&mut sensor, &mut sink)
        .context("startup failed, device halted")?;

    info!("System ready. Entering sampling loop.");

    // ── 5. Sampling loop ──────────────────────────────────────
    match app.run(&mut sensor, &mut display, &mut sink, &mut clock) {
        Ok(never) => match never {},
        Err(e) => Err(e).context("sampling loop stopped"),
    }
}
