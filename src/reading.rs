//! Sensor reading entity.
//!
//! A [`Reading`] is built fresh every sampling cycle from the three raw
//! sensor values and consumed immediately by the classifier and the sinks.

/// One sampled snapshot of CO2, temperature and humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// CO2 concentration in ppm, truncated to an integer.
    pub co2_ppm: u32,
    /// Temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent. Not clamped.
    pub humidity_rh: f32,
}

impl Reading {
    pub const fn new(co2_ppm: u32, temperature_c: f32, humidity_rh: f32) -> Self {
        Self {
            co2_ppm,
            temperature_c,
            humidity_rh,
        }
    }

    /// Build a reading from the raw sensor getters.
    ///
    /// The CO2 value is truncated toward zero. Negative values saturate to
    /// 0 and NaN maps to 0, so construction never fails.
    pub fn from_sensor(co2: f32, temperature_c: f32, humidity_rh: f32) -> Self {
        Self::new(co2 as u32, temperature_c, humidity_rh)
    }
}
