pub mod activation; // single-use activation codes + signed tokens
pub mod config;
pub mod report; // AI output → fixed seven-field report

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding process.
///
/// The HTTP layer that mounts this core calls this once at startup.
/// Honors `RUST_LOG`, falling back to the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
}
