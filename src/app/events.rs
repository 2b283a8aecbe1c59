//! Outbound application events.
//!
//! The [`SamplingLoop`](super::service::SamplingLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: write a serial line, log, forward, etc.

use crate::reading::Reading;
use crate::status::StatusCode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Startup handshake succeeded and periodic measurement is running.
    Started { interval_ms: u32 },

    /// A cycle produced a fresh reading and its classification.
    Sample { reading: Reading, status: StatusCode },

    /// Startup failed; the loop is halted for good.
    Halted(&'static str),
}
