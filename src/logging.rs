//! Tracing setup.

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
