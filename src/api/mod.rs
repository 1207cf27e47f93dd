use crate::core::AppState;
use axum::{http::StatusCode, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

mod routes;

/// All holdings routes under `/api`, traced, with a JSON 404 for anything else.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
}
