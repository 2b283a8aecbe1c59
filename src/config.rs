//! System configuration parameters
//!
//! Classification thresholds and loop timing for the FermentMon system.
//! Values are fixed once the sampling loop starts; a JSON document passed at
//! startup can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// CO2 level (ppm) at which fermentation counts as active.
pub const CO2_ACTIVE_MIN_PPM: u32 = 800;
/// CO2 level (ppm) at which the vessel must be vented.
pub const CO2_VENT_PPM: u32 = 10_000;
/// Lower edge of the good temperature band (Celsius).
pub const TEMP_GOOD_MIN_C: f32 = 18.0;
/// Upper edge of the good temperature band (Celsius).
pub const TEMP_GOOD_MAX_C: f32 = 24.0;
/// Humidity (%RH) below which an active batch is flagged as dry.
pub const HUMIDITY_LOW_WARN_RH: f32 = 60.0;
/// Width of the tolerance band on either side of the good band (Celsius).
pub const TEMP_TOLERANCE_C: f32 = 2.0;
/// Delay between sampling cycles (milliseconds).
pub const POLL_INTERVAL_MS: u32 = 15_000;

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- CO2 ---
    /// CO2 concentration (ppm) at or above which fermentation is active
    pub co2_active_min: u32,
    /// CO2 concentration (ppm) at or above which venting is required
    pub co2_vent: u32,

    // --- Temperature ---
    /// Good band lower bound (Celsius, inclusive)
    pub temp_good_min: f32,
    /// Good band upper bound (Celsius, inclusive)
    pub temp_good_max: f32,

    // --- Humidity ---
    /// Humidity warning level (%RH, strict)
    pub humidity_low_warn: f32,

    // --- Timing ---
    /// Sampling interval (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            co2_active_min: CO2_ACTIVE_MIN_PPM,
            co2_vent: CO2_VENT_PPM,

            temp_good_min: TEMP_GOOD_MIN_C,
            temp_good_max: TEMP_GOOD_MAX_C,

            humidity_low_warn: HUMIDITY_LOW_WARN_RH,

            poll_interval_ms: POLL_INTERVAL_MS, // 1 sample / 15 s
        }
    }
}

impl MonitorConfig {
    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.co2_active_min >= self.co2_vent {
            return Err(ConfigError::ValidationFailed(
                "co2_active_min must be below co2_vent",
            ));
        }
        if !self.temp_good_min.is_finite() || !self.temp_good_max.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "temperature band must be finite",
            ));
        }
        if self.temp_good_min >= self.temp_good_max {
            return Err(ConfigError::ValidationFailed(
                "temp_good_min must be below temp_good_max",
            ));
        }
        if !(0.0..=100.0).contains(&self.humidity_low_warn) {
            return Err(ConfigError::ValidationFailed(
                "humidity_low_warn must be within 0..=100 %RH",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }

    /// Below this temperature the batch is classified as cold.
    pub fn cold_limit_c(&self) -> f32 {
        self.temp_good_min - TEMP_TOLERANCE_C
    }

    /// Above this temperature the batch is classified as warm.
    pub fn warm_limit_c(&self) -> f32 {
        self.temp_good_max + TEMP_TOLERANCE_C
    }
}
