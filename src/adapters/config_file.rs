//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] by reading a JSON document from disk. Every
//! field is optional; missing fields take their defaults. The document is
//! validated before it is handed to the sampling loop.
//!
//! ```json
//! { "co2_vent": 12000, "temp_good_min": 19.0, "poll_interval_ms": 10000 }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    /// `None` means "no file given": [`load`](ConfigPort::load) returns defaults.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("No config file given, using defaults");
            return Ok(MonitorConfig::default());
        };

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("Config read failed ({}): {}", path.display(), e);
                ConfigError::IoError
            }
        })?;

        let config: MonitorConfig = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Config parse failed ({}): {}", path.display(), e);
            ConfigError::Corrupted
        })?;

        config.validate()?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}
