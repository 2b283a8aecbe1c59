//! Console backend for the `log` facade.
//!
//! On the device the platform logger routes `log` records to the UART; on
//! the host a `tracing-subscriber` fmt layer picks them up through its `log`
//! bridge and writes them to stderr, so they never interleave with the
//! diagnostic line stream on stdout.
//!
//! Filtering uses `EnvFilter` directives from [`LOG_LEVEL_ENV`], e.g.
//! `FERMENTMON_LOG=debug` or `FERMENTMON_LOG=fermentmon::sensors=trace`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the filter directives.
pub const LOG_LEVEL_ENV: &str = "FERMENTMON_LOG";

/// Used when the variable is unset or does not parse.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Build the filter from optional directives, falling back to
/// [`DEFAULT_DIRECTIVES`].
pub fn filter_or_default(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the subscriber and the `log` bridge. Call once, before anything
/// logs.
pub fn init() -> Result<(), TryInitError> {
    let filter = filter_or_default(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
