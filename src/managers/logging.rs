//! Console logging setup
//!
//! Diagnostics go to stderr through tracing; stdout is reserved for the
//! menu, the streamed borg output and the final report. The per-run log
//! file is a program artifact written by the archive runner, not a tracing
//! sink.

use tracing_subscriber::EnvFilter;

/// Initialize console-only logging, honoring `RUST_LOG` when set
pub fn init_console_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
