//! Sampling loop: the hexagonal core.
//!
//! [`SamplingLoop`] owns the configuration and the loop state. All I/O flows
//! through port traits injected at call sites, making the whole loop
//! testable with mock adapters.
//!
//! ```text
//!                ┌────────────────────────┐ ──▶ DisplayPort
//!  SensorPort ──▶│      SamplingLoop      │
//!                │  acquire · classify    │ ──▶ EventSink
//!   DelayPort ◀──│                        │
//!                └────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!  Stopped ──start() ok──▶ Sampling ◀──interval──┐
//!     │                       │                  │
//!     │                       └──any outcome──▶ IdleWait
//!     └──start() handshake fails──▶ Halted (terminal)
//! ```

use core::convert::Infallible;

use log::{debug, error, info};

use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::reading::Reading;
use crate::status::{StatusCode, classify};

use super::events::AppEvent;
use super::ports::{DelayPort, DisplayPort, EventSink, SensorPort};

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed; startup has not run yet.
    Stopped,
    /// Blocking on sensor acquisition.
    Sampling,
    /// Suspended for the poll interval.
    IdleWait,
    /// Startup failed. No further cycles will run.
    Halted,
}

/// Result of one acquire → classify → dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Fresh data was classified and dispatched to both sinks.
    Sampled { reading: Reading, status: StatusCode },
    /// The sensor had no new data; nothing was dispatched.
    Skipped,
}

// ───────────────────────────────────────────────────────────────
// SamplingLoop
// ───────────────────────────────────────────────────────────────

pub struct SamplingLoop {
    config: MonitorConfig,
    state: LoopState,
}

impl SamplingLoop {
    /// Construct the loop from configuration.
    ///
    /// Does **not** touch the sensor; call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: LoopState::Stopped,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// One-time startup: handshake with the sensor and start periodic mode.
    ///
    /// A failed handshake moves the loop to [`LoopState::Halted`], emits a
    /// one-time notice and returns [`Error::Init`]. The halted state is
    /// terminal; later calls return [`Error::Halted`].
    pub fn start(&mut self, sensor: &mut impl SensorPort, sink: &mut impl EventSink) -> Result<()> {
        match self.state {
            LoopState::Halted => return Err(Error::Halted),
            LoopState::Sampling | LoopState::IdleWait => return Ok(()),
            LoopState::Stopped => {}
        }

        if !sensor.begin() {
            const REASON: &str = "sensor handshake failed";
            error!("{REASON}, halting");
            self.state = LoopState::Halted;
            sink.emit(&AppEvent::Halted(REASON));
            return Err(Error::Init(REASON));
        }

        sensor.start_periodic_measurement();
        self.state = LoopState::Sampling;
        sink.emit(&AppEvent::Started {
            interval_ms: self.config.poll_interval_ms,
        });
        info!(
            "Sampling loop started, interval {} ms",
            self.config.poll_interval_ms
        );
        Ok(())
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: acquire → classify → dispatch → sleep.
    ///
    /// A sensor miss skips classification and both sinks but still waits
    /// out the interval.
    pub fn cycle(
        &mut self,
        sensor: &mut impl SensorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        delay: &mut impl DelayPort,
    ) -> Result<CycleOutcome> {
        match self.state {
            LoopState::Stopped => return Err(Error::NotStarted),
            LoopState::Halted => return Err(Error::Halted),
            LoopState::Sampling | LoopState::IdleWait => {}
        }
        self.state = LoopState::Sampling;

        // 1. Acquire
        let outcome = if sensor.read_measurement() {
            let reading =
                Reading::from_sensor(sensor.co2(), sensor.temperature(), sensor.humidity());

            // 2. Classify
            let status = classify(&reading, &self.config);

            // 3. Dispatch
            display.render(&reading, status);
            sink.emit(&AppEvent::Sample { reading, status });

            CycleOutcome::Sampled { reading, status }
        } else {
            debug!("No new sensor data, skipping cycle");
            CycleOutcome::Skipped
        };

        // 4. Suspend
        self.state = LoopState::IdleWait;
        delay.sleep_ms(self.config.poll_interval_ms);
        self.state = LoopState::Sampling;

        Ok(outcome)
    }

    /// Cycle forever. Only returns if the loop was never started or is
    /// halted.
    pub fn run(
        &mut self,
        sensor: &mut impl SensorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
        delay: &mut impl DelayPort,
    ) -> Result<Infallible> {
        loop {
            self.cycle(sensor, display, sink, delay)?;
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The immutable configuration this loop runs with.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
