//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SamplingLoop (domain)
//! ```
//!
//! Driven adapters (sensor, display, diagnostic sink, clock, config store)
//! implement these traits. The [`SamplingLoop`](super::service::SamplingLoop)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::config::MonitorConfig;
use crate::reading::Reading;
use crate::status::StatusCode;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for a combined CO2 / temperature / humidity sensor.
///
/// The getters are only meaningful immediately after
/// [`read_measurement`](SensorPort::read_measurement) returned `true`.
pub trait SensorPort {
    /// Handshake with the sensor. `false` is fatal for the whole system.
    fn begin(&mut self) -> bool;

    /// Put the sensor into periodic measurement mode.
    fn start_periodic_measurement(&mut self);

    /// Fetch a fresh measurement. `false` means no new data this cycle.
    fn read_measurement(&mut self) -> bool;

    /// CO2 concentration (ppm) from the last successful read.
    fn co2(&self) -> f32;

    /// Temperature (Celsius) from the last successful read.
    fn temperature(&self) -> f32;

    /// Relative humidity (%RH) from the last successful read.
    fn humidity(&self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → bitmap panel)
// ───────────────────────────────────────────────────────────────

/// Best-effort visual refresh. Failures stay inside the adapter.
pub trait DisplayPort {
    fn render(&mut self, reading: &Reading, status: StatusCode);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostic stream)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide how they are written out.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Delay port (driven adapter: domain → timer)
// ───────────────────────────────────────────────────────────────

/// Suspends the single sampling task for the inter-cycle interval.
pub trait DelayPort {
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: startup → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the monitor configuration once at startup.
///
/// Implementations MUST validate before returning: invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<MonitorConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No stored config found.
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::NotFound => Self::Config("config not found"),
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::IoError => Self::Config("config I/O error"),
        }
    }
}
