//! Serial line event sink adapter.
//!
//! Implements [`EventSink`] by writing one line per sample to any
//! `io::Write` (stdout on the host, a UART on the device):
//!
//! ```text
//! CO2:12000 ppm	T:22.0 C	RH:65.0 %	VENT
//! ```
//!
//! Lifecycle events go to the `log` facade instead; the fatal halt notice
//! is the only non-sample line on the stream.

use core::fmt::Write as _;
use std::io::Write;

use heapless::String;
use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::reading::Reading;
use crate::status::StatusCode;

/// Large enough for `u32::MAX` ppm and two `-f32::MAX` values at `{:.1}`.
pub const LINE_CAPACITY: usize = 128;

/// Format one diagnostic line, without the trailing newline.
pub fn format_sample(reading: &Reading, status: StatusCode) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let _ = write!(
        line,
        "CO2:{} ppm\tT:{:.1} C\tRH:{:.1} %\t{}",
        reading.co2_ppm,
        reading.temperature_c,
        reading.humidity_rh,
        status.token()
    );
    line
}

/// Adapter that writes every sample to a line-oriented stream.
pub struct SerialLogSink<W> {
    out: W,
}

impl<W: Write> SerialLogSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer (e.g. to inspect a captured buffer).
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("Serial sink write failed: {}", e);
        }
    }
}

impl<W: Write> EventSink for SerialLogSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Sample { reading, status } => {
                let line = format_sample(reading, *status);
                self.write_line(&line);
            }
            AppEvent::Started { interval_ms } => {
                info!("START | interval={}ms", interval_ms);
            }
            AppEvent::Halted(reason) => {
                let mut line: String<LINE_CAPACITY> = String::new();
                let _ = write!(line, "HALT: {reason}");
                self.write_line(&line);
            }
        }
    }
}
