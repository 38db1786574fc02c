use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/ask`.
///
/// `question` is optional at the JSON level so that a missing field and an
/// empty one produce the same validation error.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The student's question.
    #[serde(default)]
    pub question: Option<String>,
    /// Optional topic label, usually a `name` from `/api/topics`.
    #[serde(default)]
    pub topic: Option<String>,
}

/// Response payload for `POST /api/ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Generated answer text.
    pub answer: String,
    /// Input topic echoed back (empty string when none).
    pub topic: String,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}
