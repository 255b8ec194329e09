use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialises the tracing subscriber for binaries and tests. `RUST_LOG`
/// overrides the default `info` filter. Repeated calls are no-ops, so
/// test fixtures may call this freely; embedding applications that
/// install their own subscriber skip it.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
