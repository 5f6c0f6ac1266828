//! Social Mood Dashboard — Binary Entrypoint
//! Boots the Axum HTTP server: config, tracing, metrics, then the router.

use shuttle_axum::ShuttleAxum;

use social_mood_dashboard::api::{self, AppState};
use social_mood_dashboard::config::DashboardConfig;
use social_mood_dashboard::logging;
use social_mood_dashboard::metrics::Metrics;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    if let Err(e) = logging::init_tracing() {
        eprintln!("tracing subscriber not installed: {e}");
    }

    let config = DashboardConfig::load_default()?;
    tracing::info!(
        other_threshold = config.other_threshold,
        max_posts = config.max_posts,
        result_limit = config.result_limit,
        "dashboard config loaded"
    );

    let metrics = Metrics::init(config.other_threshold)?;
    let router = api::create_router(AppState::new(config), Some(&metrics));

    Ok(router.into())
}
