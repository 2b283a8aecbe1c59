//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements   | Connects to                      |
//! |------------------|--------------|----------------------------------|
//! | `display`        | DisplayPort  | Frame buffer + `PagePanel`       |
//! | `log_sink`       | EventSink    | Serial / stdout line stream      |
//! | `time`           | DelayPort    | Host monotonic clock             |
//! |                  | DelayNs      |                                  |
//! | `config_file`    | ConfigPort   | JSON file on disk                |
//! | `console_logger` | (log bridge) | tracing-subscriber → stderr      |
//!
//! Sensor drivers live in [`crate::sensors`].

pub mod config_file;
pub mod console_logger;
pub mod display;
pub mod log_sink;
pub mod time;
