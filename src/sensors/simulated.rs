//! Simulated fermentation sensor for host runs.
//!
//! Produces a deterministic batch profile so the full loop can be exercised
//! without hardware:
//!
//! - CO2 climbs from ambient to a peak over the first third of the profile,
//!   holds, then decays back as the batch finishes.
//! - Temperature swings around 21 °C with a slow sine.
//! - Humidity drifts between roughly 55 and 71 %RH.
//!
//! Every call to `read_measurement` advances one step.

use log::debug;

use crate::app::ports::SensorPort;

const AMBIENT_CO2_PPM: f32 = 420.0;
const DEFAULT_PEAK_CO2_PPM: f32 = 11_500.0;
const DEFAULT_PROFILE_STEPS: u32 = 240;

pub struct SimulatedSensor {
    step: u32,
    profile_steps: u32,
    peak_co2_ppm: f32,
    handshake_ok: bool,
    miss_every: Option<u32>,
    polls: u32,
    co2: f32,
    temperature: f32,
    humidity: f32,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self {
            step: 0,
            profile_steps: DEFAULT_PROFILE_STEPS,
            peak_co2_ppm: DEFAULT_PEAK_CO2_PPM,
            handshake_ok: true,
            miss_every: None,
            polls: 0,
            co2: 0.0,
            temperature: 0.0,
            humidity: 0.0,
        }
    }

    /// Force the handshake to fail (exercises the halt path).
    pub fn with_handshake(mut self, ok: bool) -> Self {
        self.handshake_ok = ok;
        self
    }

    /// Report "no new data" on every `n`-th poll. `0` disables misses.
    pub fn with_miss_every(mut self, n: u32) -> Self {
        self.miss_every = (n > 0).then_some(n);
        self
    }

    /// Length of one full batch profile in samples. Clamped to at least 3.
    pub fn with_profile_steps(mut self, steps: u32) -> Self {
        self.profile_steps = steps.max(3);
        self
    }

    pub fn with_peak_co2(mut self, ppm: f32) -> Self {
        self.peak_co2_ppm = ppm;
        self
    }

    fn co2_at(&self, step: u32) -> f32 {
        let third = self.profile_steps / 3;
        let pos = step % self.profile_steps;
        let span = self.peak_co2_ppm - AMBIENT_CO2_PPM;
        if pos < third {
            AMBIENT_CO2_PPM + span * pos as f32 / third as f32
        } else if pos < 2 * third {
            self.peak_co2_ppm
        } else {
            let tail = (self.profile_steps - 2 * third) as f32;
            let left = (self.profile_steps - pos) as f32;
            AMBIENT_CO2_PPM + span * left / tail
        }
    }

    fn temperature_at(step: u32) -> f32 {
        21.0 + 6.5 * (step as f32 * 0.05).sin()
    }

    fn humidity_at(step: u32) -> f32 {
        63.0 + 8.0 * (step as f32 * 0.031).cos()
    }
}

impl SensorPort for SimulatedSensor {
    fn begin(&mut self) -> bool {
        self.handshake_ok
    }

    fn start_periodic_measurement(&mut self) {
        debug!("SimulatedSensor: periodic measurement started");
    }

    fn read_measurement(&mut self) -> bool {
        self.polls = self.polls.wrapping_add(1);
        if self.miss_every.is_some_and(|n| self.polls % n == 0) {
            return false;
        }

        self.co2 = self.co2_at(self.step);
        self.temperature = Self::temperature_at(self.step);
        self.humidity = Self::humidity_at(self.step);
        self.step = self.step.wrapping_add(1);
        true
    }

    fn co2(&self) -> f32 {
        self.co2
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn humidity(&self) -> f32 {
        self.humidity
    }
}
