use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/streak", post(handlers::post_streak))
        .route("/api/insights", post(handlers::post_insights))
        .route("/api/heatmap", post(handlers::post_heatmap))
        .with_state(state)
}
