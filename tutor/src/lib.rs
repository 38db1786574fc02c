//! Study relay: turns a student question into a Gemini prompt and back.
//!
//! Public API: [`Tutor::ask`]. It validates the question, builds the prompt
//! (fixed preamble + optional topic + question), issues exactly one
//! `generateContent` call and returns the first generated text together with
//! the echoed topic and a generation timestamp. Nothing is cached, retried or
//! stored between calls.

mod error;
pub mod prompt;
pub mod topics;

use std::{sync::Arc, time::Instant};

use ai_llm_service::{GeminiService, LlmModelConfig, config::default_config::config_gemini};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

pub use error::RelayError;
pub use topics::{TOPICS, Topic};

/// Answer produced for one question.
#[derive(Clone, Debug, PartialEq)]
pub struct TutorAnswer {
    /// First text part generated upstream.
    pub answer: String,
    /// Topic exactly as the caller passed it (empty when none).
    pub topic: String,
    /// When the answer was received.
    pub generated_at: DateTime<Utc>,
}

/// Stateless relay around a shared [`GeminiService`].
///
/// Cheap to clone; clones share the same HTTP client and credential.
#[derive(Clone)]
pub struct Tutor {
    llm: Arc<GeminiService>,
}

impl Tutor {
    /// Wraps an already configured service.
    pub fn new(llm: GeminiService) -> Self {
        Self { llm: Arc::new(llm) }
    }

    /// Builds the service from an explicit config.
    ///
    /// # Errors
    /// Propagates construction errors from [`GeminiService::new`].
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, ai_llm_service::AiLlmError> {
        Ok(Self::new(GeminiService::new(cfg)?))
    }

    /// Builds the service from `GEMINI_*` environment variables.
    ///
    /// # Errors
    /// Fails when `GEMINI_API_KEY` is missing or any knob is malformed.
    pub fn from_env() -> Result<Self, ai_llm_service::AiLlmError> {
        Self::from_config(config_gemini()?)
    }

    /// Model id answers come from.
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Topics offered to clients, in display order.
    pub fn topics(&self) -> &'static [Topic] {
        TOPICS
    }

    /// Asks one question.
    ///
    /// # Errors
    /// - [`RelayError::Validation`] if `question` is blank (no outbound call is made)
    /// - [`RelayError::UpstreamTransport`] / [`RelayError::UpstreamProtocol`] /
    ///   [`RelayError::EmptyResult`] for upstream failures
    #[instrument(
        name = "tutor_ask",
        skip(self, question, topic),
        fields(question_len = question.len(), topic = topic.unwrap_or(""))
    )]
    pub async fn ask(
        &self,
        question: &str,
        topic: Option<&str>,
    ) -> Result<TutorAnswer, RelayError> {
        if question.trim().is_empty() {
            warn!("rejected blank question");
            return Err(RelayError::Validation("question must not be empty"));
        }

        let started = Instant::now();
        let prompt = prompt::build_prompt(question, topic);
        let answer = self.llm.generate(&prompt).await?;

        info!(
            prompt_len = prompt.len(),
            answer_len = answer.len(),
            latency_ms = started.elapsed().as_millis(),
            "question answered"
        );

        Ok(TutorAnswer {
            answer,
            topic: topic.unwrap_or_default().to_string(),
            generated_at: Utc::now(),
        })
    }
}
