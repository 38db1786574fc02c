/// Configuration for a Gemini model invocation.
///
/// Built once at startup (see [`crate::config::default_config`]) and then
/// handed by value to [`crate::GeminiService::new`]. Nothing mutates it
/// afterwards.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "gemini-pro".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("fake-key".to_string()),
///     max_output_tokens: None,
///     temperature: None,
///     timeout_secs: None,
/// };
/// assert!(cfg.api_key.is_some());
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier (e.g., `"gemini-pro"`).
    pub model: String,

    /// API base URL, without the `/v1beta/...` path.
    pub endpoint: String,

    /// Credential passed upstream as the `key` query parameter.
    pub api_key: Option<String>,

    /// Upper bound on generated tokens (`generationConfig.maxOutputTokens`).
    pub max_output_tokens: Option<u32>,

    /// Sampling temperature (`generationConfig.temperature`).
    pub temperature: Option<f32>,

    /// Request timeout in seconds. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
