//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DEX_LOG";

/// Initializes logging to stderr.
///
/// Reads per-target levels from `DEX_LOG`
/// (e.g. `DEX_LOG=dex_extract::graph=debug,dex_extract=info`) and falls back
/// to `dex_extract=info` when it is unset or invalid. Safe to call more
/// than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("dex_extract=info,dex_inspect=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
