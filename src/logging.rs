//! Diagnostic logging
//!
//! Library code emits `tracing` events; the binary installs a fmt subscriber
//! writing to stderr. Stdout is reserved for script output.

use tracing_subscriber::EnvFilter;

/// Filter directives, in `EnvFilter` syntax
pub const LOG_ENV: &str = "ENVAULT_LOG";

/// Any non-empty value turns on debug logging
pub const DEBUG_ENV: &str = "ENVAULT_DEBUG";

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directives from the environment
fn directives(log: Option<String>, debug: Option<String>) -> String {
    match (log, debug) {
        (Some(log), _) if !log.trim().is_empty() => log,
        (_, Some(debug)) if !debug.is_empty() => "debug".to_string(),
        _ => DEFAULT_LEVEL.to_string(),
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init() {
    let directives = directives(std::env::var(LOG_ENV).ok(), std::env::var(DEBUG_ENV).ok());
    let filter =
        EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
