//! Logger setup for binaries and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global `env_logger` backend.
///
/// `RUST_LOG` takes precedence; otherwise `info` (or `debug` when `verbose`).
/// Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Fails only when a logger is already installed
    let _ = builder.try_init();
}
