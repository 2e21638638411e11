use tracing_subscriber::{fmt, EnvFilter};

/// Resolve the log filter: `RUST_LOG` wins, then `LOG_LEVEL`, then `default_level`.
pub fn resolve_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Logs go to stderr so mailmap text written
/// to stdout by callers stays clean.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing(default_level: &str) {
    let _ = fmt()
        .with_env_filter(resolve_filter(default_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
