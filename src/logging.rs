use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for a batch binary.
///
/// Diagnostics default to `info`; override with `RUST_LOG`. Report output
/// goes straight to stdout and is not routed through tracing.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
