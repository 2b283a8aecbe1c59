//! Unified error types for the FermentMon firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level startup and sampling paths uniform. All variants are `Copy` so
//! they can be handed around the loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor transaction failed.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
    /// A cycle was requested before the startup sequence ran.
    NotStarted,
    /// The loop hit a fatal startup failure and will not sample again.
    Halted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::NotStarted => write!(f, "sampling loop not started"),
            Self::Halted => write!(f, "sampling loop halted"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The I2C transaction was NACKed or the bus reported a fault.
    I2cFailed,
    /// A response word failed its CRC-8 check.
    CrcMismatch,
    /// The response was shorter than the command requires.
    ShortResponse,
    /// A measurement was requested before periodic mode was started.
    NotStarted,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2cFailed => write!(f, "I2C transaction failed"),
            Self::CrcMismatch => write!(f, "CRC mismatch"),
            Self::ShortResponse => write!(f, "short response"),
            Self::NotStarted => write!(f, "periodic measurement not started"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
