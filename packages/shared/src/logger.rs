//! Logger setup backed by `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the filter becomes
/// `"{app_name}={default_level},clinic_chat_client={default_level},warn"` so the
/// binary and the library log at `default_level` while dependencies stay quiet.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(app_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(app_name, default_level)));

    if fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(true)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logger initialized for {}", app_name);
    }
}

fn default_directives(app_name: &str, default_level: &str) -> String {
    // Cargo bin names use dashes, tracing targets use underscores.
    let target = app_name.replace('-', "_");
    format!("{target}={default_level},clinic_chat_client={default_level},warn")
}
