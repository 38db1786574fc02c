//! Gemini text-generation client shared by the relay.
//!
//! - [`config`] resolves an immutable [`LlmModelConfig`] from environment-like lookups.
//! - [`services::gemini_service::GeminiService`] performs one non-streaming
//!   `generateContent` call per prompt.
//! - [`error_handler`] exposes the unified [`AiLlmError`].
//! - [`telemetry`] provides a crate-scoped `tracing-subscriber` layer.

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
}

pub mod error_handler;
pub mod telemetry;

pub mod services {
    pub mod gemini_service;
}

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use services::gemini_service::GeminiService;
