//! FermentMon firmware library.
//!
//! Samples CO2, temperature and humidity, classifies the fermentation
//! state and pushes the result to a bitmap display and a diagnostic line
//! stream. The pure-logic modules are exposed for integration testing.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod reading;
pub mod status;

pub mod adapters;
pub mod drivers;
pub mod sensors;

pub use error::{Error, Result};
pub use reading::Reading;
pub use status::{StatusCode, classify};
