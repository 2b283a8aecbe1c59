//! Sensor drivers: each one implements [`SensorPort`](crate::app::ports::SensorPort).
//!
//! | Driver      | Backend                                   |
//! |-------------|-------------------------------------------|
//! | `scd4x`     | Sensirion SCD4x over `embedded-hal` I2C   |
//! | `simulated` | Deterministic batch profile for host runs |

pub mod scd4x;
pub mod simulated;

pub use scd4x::Scd4x;
pub use simulated::SimulatedSensor;
