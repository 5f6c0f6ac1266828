//! Tracing subscriber setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

pub const ENV_LOG_JSON: &str = "DASHBOARD_LOG_JSON";
pub const DEFAULT_FILTER: &str = "social_mood_dashboard=info,warn";

/// Install the global subscriber: `RUST_LOG` (or `DEFAULT_FILTER`), compact
/// lines by default, JSON lines when `DASHBOARD_LOG_JSON=1`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    let json = std::env::var(ENV_LOG_JSON)
        .ok()
        .is_some_and(|v| v == "1");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    }
}
