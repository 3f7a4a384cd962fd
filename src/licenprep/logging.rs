//! Logging setup for the binary, using `tracing` and `tracing-subscriber`.
//!
//! Library code only emits events; nothing is printed unless a subscriber is
//! installed. Output goes to stderr so it never mixes with command output.
//!
//! # Log Levels
//!
//! - `warn`: persistence failures that were swallowed
//! - `info`: startup, generation requests
//! - `debug`: ignored actions (unknown ids, repeated answers)
//!
//! `LICENPREP_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "LICENPREP_LOG";

/// Map a `-v` count to a level: none → warn, `-v` → info, `-vv` → debug,
/// more → trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("licenprep={}", level.as_str().to_lowercase())))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let filter = build_env_filter(level_for_verbosity(verbosity));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
