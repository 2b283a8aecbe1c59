//! Host time adapter.
//!
//! Provides monotonic uptime and the blocking delays used by the sampling
//! loop ([`DelayPort`]) and by bus drivers ([`DelayNs`]). Backed by
//! `std::time::Instant` and `std::thread::sleep`; while sleeping, nothing
//! else in the core runs.

use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use crate::app::ports::DelayPort;

pub struct HostTimeAdapter {
    start: Instant,
}

impl Default for HostTimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTimeAdapter {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the adapter was created (monotonic).
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Seconds since the adapter was created (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl DelayPort for HostTimeAdapter {
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl DelayNs for HostTimeAdapter {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
