#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! The engine itself only emits `tracing` events behind the `tracing`
//! feature. Hosts that want them written somewhere install a subscriber;
//! with `tracing-json` enabled, [`init_json_subscriber`] installs a JSON
//! formatter filtered by `RUST_LOG` (default `info`).

/// Install the JSON subscriber as the global default.
///
/// Returns `false` if a global subscriber was already set (including by an
/// earlier call), leaving it in place.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .try_init()
        .is_ok()
}

/// Without `tracing-json` there is nothing to install.
#[cfg(not(feature = "tracing-json"))]
pub fn init_json_subscriber() -> bool {
    false
}
