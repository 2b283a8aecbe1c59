//! Fermentation status classifier.
//!
//! Maps a [`Reading`] to one of seven [`StatusCode`]s with an ordered rule
//! cascade. The first rule that matches wins, so the order of the arms in
//! [`classify`] is the priority order:
//!
//! | # | Condition                                   | Status |
//! |---|---------------------------------------------|--------|
//! | 1 | `co2 >= co2_vent`                           | Vent   |
//! | 2 | `t < temp_good_min - 2`                     | Cold   |
//! | 3 | `t > temp_good_max + 2`                     | Warm   |
//! | 4 | `co2 < co2_active_min`                      | Idle   |
//! | 5 | `temp_good_min <= t <= temp_good_max`       | Good   |
//! | 6 | `rh < humidity_low_warn`                    | Dry    |
//! | 7 | otherwise                                   | Ok     |
//!
//! Between the good band and the tolerance limits lies a dead zone where
//! rules 4, 6 or 7 decide. Inputs regularly satisfy several conditions at
//! once; reordering the arms changes results.

use core::fmt;

use crate::config::MonitorConfig;
use crate::reading::Reading;

/// Derived fermentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Good,
    Idle,
    Vent,
    Cold,
    Warm,
    Dry,
    Ok,
}

impl StatusCode {
    /// All variants, in declaration order.
    pub const ALL: [StatusCode; 7] = [
        Self::Good,
        Self::Idle,
        Self::Vent,
        Self::Cold,
        Self::Warm,
        Self::Dry,
        Self::Ok,
    ];

    /// Token used on the diagnostic line stream.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Idle => "IDLE",
            Self::Vent => "VENT",
            Self::Cold => "COLD",
            Self::Warm => "WARM",
            Self::Dry => "DRY",
            Self::Ok => "OK",
        }
    }

    /// Short operator hint shown under the readings.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Good => "fermenting well",
            Self::Idle => "waiting for activity",
            Self::Vent => "ventilate now!",
            Self::Cold => "too cold",
            Self::Warm => "too warm",
            Self::Dry => "air too dry",
            Self::Ok => "fermenting",
        }
    }

    /// Whether this status needs operator attention.
    pub const fn is_alert(self) -> bool {
        matches!(self, Self::Vent | Self::Cold | Self::Warm)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Classify a reading against the configured thresholds.
///
/// Total over every input: comparisons with NaN are false, so a NaN
/// temperature or humidity falls through to `Idle` or `Ok`.
pub fn classify(reading: &Reading, config: &MonitorConfig) -> StatusCode {
    match *reading {
        Reading { co2_ppm, .. } if co2_ppm >= config.co2_vent => StatusCode::Vent,
        Reading { temperature_c, .. } if temperature_c < config.cold_limit_c() => StatusCode::Cold,
        Reading { temperature_c, .. } if temperature_c > config.warm_limit_c() => StatusCode::Warm,
        Reading { co2_ppm, .. } if co2_ppm < config.co2_active_min => StatusCode::Idle,
        Reading { temperature_c, .. }
            if (config.temp_good_min..=config.temp_good_max).contains(&temperature_c) =>
        {
            StatusCode::Good
        }
        Reading { humidity_rh, .. } if humidity_rh < config.humidity_low_warn => StatusCode::Dry,
        _ => StatusCode::Ok,
    }
}
