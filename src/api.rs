use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, DashboardOptions};
use crate::ingest::{self, types::AnalysisResponse, types::WirePost, IngestError};
use crate::metrics::Metrics;
use crate::ranking::{self, AnalysisSummary};

#[derive(Clone)]
pub struct AppState {
    config: Arc<DashboardConfig>,
    options: Arc<DashboardOptions>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let options = DashboardOptions::from(&config);
        Self {
            config: Arc::new(config),
            options: Arc::new(options),
        }
    }
}

/// Router without `/metrics`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/dashboard", post(build_dashboard))
        .route("/summary", post(build_summary))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Full app router; mounts `/metrics` when a recorder was installed.
pub fn create_router(state: AppState, metrics: Option<&Metrics>) -> Router {
    let app = router(state);
    match metrics {
        Some(m) => app.merge(m.router()),
        None => app,
    }
}

#[derive(Debug)]
pub struct ApiError(IngestError);

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            IngestError::MalformedPost { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            IngestError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(serde::Serialize)]
struct DashboardResp {
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    dashboard: Dashboard,
}

async fn build_dashboard(
    State(state): State<AppState>,
    Json(body): Json<AnalysisResponse>,
) -> Result<Json<DashboardResp>, ApiError> {
    let started = Instant::now();
    let topic = body.topic.clone();
    let set = ingest::result_set_from_response(body)?;
    let dashboard = Dashboard::build(&set, &state.options);

    counter!("dashboard_requests_total").increment(1);
    counter!("dashboard_posts_total").increment(set.len() as u64);
    histogram!("dashboard_build_ms").record(started.elapsed().as_secs_f64() * 1000.0);
    tracing::info!(
        posts = set.len(),
        slices = dashboard.distribution.len(),
        "dashboard built"
    );

    Ok(Json(DashboardResp {
        topic,
        generated_at: Utc::now(),
        dashboard,
    }))
}

#[derive(serde::Deserialize)]
struct SummaryReq {
    #[serde(default)]
    topic: Option<String>,
    posts: Vec<WirePost>,
    /// Overrides `result_limit` for this request.
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(serde::Serialize)]
struct SummaryResp {
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: AnalysisSummary,
}

async fn build_summary(
    State(state): State<AppState>,
    Json(body): Json<SummaryReq>,
) -> Result<Json<SummaryResp>, ApiError> {
    let posts = ingest::normalize_posts("posts", body.posts)?;
    let mut opts = state.config.summary_options();
    if let Some(limit) = body.limit {
        opts.result_limit = limit;
    }
    let received = posts.len();
    let summary = ranking::summarize(posts, &opts);
    tracing::info!(
        received,
        kept = summary.total_posts_analyzed,
        "summary built"
    );

    Ok(Json(SummaryResp {
        topic: body.topic,
        generated_at: Utc::now(),
        summary,
    }))
}
