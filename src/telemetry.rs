//! Tracing subscriber set-up.

use tracing_subscriber::EnvFilter;

/// Boxed error returned when the global subscriber cannot be installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync>;

/// Installs a formatting subscriber as the global default.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when `debug`
/// is set and `info` when it is not.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(debug: bool) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}

const fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}
