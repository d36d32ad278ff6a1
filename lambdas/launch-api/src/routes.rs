use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use launches::stats::{self, LaunchStats};
use launches::{LaunchRecord, LaunchRepository};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn LaunchRepository>,
    pub table_name: String,
}

/// JSON endpoints, with anything else served from `static_dir`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/launches", get(list_launches))
        .route("/launches/:launch_id", get(get_launch))
        .route("/stats/summary", get(stats_summary))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({"status": "ok", "table": state.table_name}))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    status: Option<String>,
}

async fn list_launches(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<LaunchRecord>>, ApiError> {
    let mut launches = state.repo.scan_all().await?;

    if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
        launches.retain(|launch| launch.status.as_str() == status);
    }
    launches.sort_by(|a, b| b.launch_date_unix.cmp(&a.launch_date_unix));

    Ok(Json(launches))
}

async fn get_launch(
    State(state): State<AppState>,
    UrlPath(launch_id): UrlPath<String>,
) -> Result<Json<LaunchRecord>, ApiError> {
    state
        .repo
        .get(&launch_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn stats_summary(State(state): State<AppState>) -> Result<Json<LaunchStats>, ApiError> {
    let launches = state.repo.scan_all().await?;
    Ok(Json(stats::summarize(&launches)))
}
