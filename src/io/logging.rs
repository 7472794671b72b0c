//! Structured logging setup for the command-line tool
//!
//! `RUST_LOG` takes precedence when set; otherwise the level follows the
//! number of `-v` flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub const fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter, preferring `RUST_LOG` over the verbosity default
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_env_error| EnvFilter::new(verbosity_directive(verbosity)))
}

/// Install the global subscriber writing to stderr
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(verbosity: u8) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
