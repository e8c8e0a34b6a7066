//! Diagnostic logging to stderr.
//!
//! stdout carries the single gauge line read by the SNMP agent, so every
//! log line goes to stderr.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map the `-D` debug level onto a tracing level.
pub fn level_for_debug(debug: u8) -> LevelFilter {
    match debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `debug`.
pub fn init_logging(debug: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for_debug(debug).into())
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A subscriber may already be installed when used as a library.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
