pub mod ask {
    pub mod ask_question_route;
    pub mod ask_request;
}
pub mod health_route;
pub mod metrics_route;
pub mod topics_route;

use crate::error_handler::AppError;

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
