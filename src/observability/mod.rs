//! Logging setup for applications embedding the client.
//!
//! The client itself only emits `tracing` events (skipped stream lines,
//! dropped fragments, rejected summary requests); installing a subscriber
//! is the application's choice. These helpers wire up the conventional
//! one.

use tracing_subscriber::EnvFilter;

/// Output format for [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output.
    Text,
    /// Newline-delimited JSON output.
    Json,
}

/// Installs a global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` when set, defaulting to `info`.
/// Calling this more than once (or alongside another global subscriber)
/// leaves the first subscriber in place.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A second init is a no-op, not an error worth surfacing.
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
