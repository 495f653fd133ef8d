use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr subscriber honoring `RUST_LOG`, defaulting to warnings
/// only so simulation output stays readable. Safe to call once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
