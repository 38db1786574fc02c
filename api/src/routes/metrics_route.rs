use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};

use crate::core::app_state::AppState;

/// Handler: GET /metrics (Prometheus text exposition format)
pub async fn render_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
