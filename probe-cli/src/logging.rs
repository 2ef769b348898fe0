use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber once, at process start.
/// - Respects `RUST_LOG` if set, falls back to `info`
/// - Timestamped compact lines on stdout
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}
