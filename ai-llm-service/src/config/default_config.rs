//! Default Gemini config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`            = credential (mandatory)
//! - `GEMINI_MODEL`              = model id (default `gemini-pro`)
//! - `GEMINI_ENDPOINT`           = API base URL (default Google's public endpoint)
//! - `GEMINI_TIMEOUT_SECS`       = optional request timeout (u64)
//! - `GEMINI_MAX_OUTPUT_TOKENS`  = optional generation cap (u32)
//! - `GEMINI_TEMPERATURE`        = optional sampling temperature (f32, `0.0..=2.0`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, must_var, opt_number, validate_http_endpoint, validate_range_f32,
        var_or,
    },
};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Constructs the Gemini config from the process environment.
///
/// # Errors
/// See [`config_gemini_from`].
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    config_gemini_from(|name| std::env::var(name).ok())
}

/// Constructs the Gemini config through an arbitrary variable lookup.
///
/// Tests pass a closure over a fixed map instead of mutating the process
/// environment.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if `GEMINI_API_KEY` is missing or blank
/// - [`ConfigError::InvalidFormat`] if `GEMINI_ENDPOINT` is not http(s)
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::OutOfRange`] for bad knobs
pub fn config_gemini_from<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(&lookup, "GEMINI_API_KEY")?;

    let endpoint = var_or(&lookup, "GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT);
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

    let model = var_or(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    if model.contains('/') || model.contains(':') {
        return Err(ConfigError::InvalidFormat {
            var: "GEMINI_MODEL",
            reason: "must be a bare model id without '/' or ':'",
        }
        .into());
    }

    let timeout_secs = opt_number::<_, u64>(&lookup, "GEMINI_TIMEOUT_SECS", "expected u64")?;
    let max_output_tokens =
        opt_number::<_, u32>(&lookup, "GEMINI_MAX_OUTPUT_TOKENS", "expected u32")?;
    let temperature = opt_number::<_, f32>(&lookup, "GEMINI_TEMPERATURE", "expected f32")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
    }

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        max_output_tokens,
        temperature,
        timeout_secs,
    })
}
