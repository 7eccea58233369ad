//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. `format` is `text` or `json`;
/// anything else falls back to text.
pub fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
