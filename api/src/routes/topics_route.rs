use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::debug;
use tutor::Topic;

use crate::core::app_state::AppState;

/// Handler: GET /api/topics
pub async fn list_topics(State(state): State<Arc<AppState>>) -> Json<&'static [Topic]> {
    let topics = state.tutor.topics();
    debug!(count = topics.len(), "listing topics");
    Json(topics)
}
