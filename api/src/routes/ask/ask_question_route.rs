//! POST /api/ask: relays one student question to the LLM.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use crate::{
    core::{app_state::AppState, metrics},
    error_handler::AppResult,
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /api/ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/api/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is Docker?","topic":"Docker and Containers"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let Json(body) = payload?;
    let question = body.question.unwrap_or_default();

    info!(
        topic = body.topic.as_deref().unwrap_or("general"),
        question_len = question.len(),
        "new question received"
    );

    let result = state.tutor.ask(&question, body.topic.as_deref()).await;
    match &result {
        Err(e) if e.is_validation() => {}
        outcome => metrics::record_ask(body.topic.as_deref(), outcome.is_err()),
    }
    let answer = result?;

    Ok(Json(AskResponse {
        answer: answer.answer,
        topic: answer.topic,
        timestamp: answer.generated_at,
    }))
}
