//! Logging setup
//!
//! Uses `tracing` with `tracing-subscriber`. `RUST_LOG` always wins; without
//! it the level comes from the `-v`/`-q` flags. Logs go to stderr so stdout
//! stays clean for piping.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
