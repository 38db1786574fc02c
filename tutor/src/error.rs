//! Typed error for the tutor crate.
//!
//! Display strings are generic on purpose: the upstream detail lives in
//! `source()` and only reaches server-side logs.

use ai_llm_service::{AiLlmError, ProviderErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or blank required input. Raised before any outbound call.
    #[error("{0}")]
    Validation(&'static str),

    /// Could not reach the upstream (connect, DNS, timeout).
    #[error("upstream transport failure")]
    UpstreamTransport(#[source] AiLlmError),

    /// Upstream answered with a non-success status or an undecodable body.
    #[error("upstream protocol failure")]
    UpstreamProtocol(#[source] AiLlmError),

    /// Well-formed upstream response without any usable text.
    #[error("upstream returned an empty result")]
    EmptyResult(#[source] AiLlmError),
}

impl RelayError {
    /// `true` for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, RelayError::Validation(_))
    }
}

impl From<AiLlmError> for RelayError {
    fn from(err: AiLlmError) -> Self {
        match &err {
            AiLlmError::HttpTransport(_) => RelayError::UpstreamTransport(err),
            AiLlmError::Provider(p) if matches!(p.kind, ProviderErrorKind::EmptyCandidates) => {
                RelayError::EmptyResult(err)
            }
            _ => RelayError::UpstreamProtocol(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::ProviderError;

    use super::*;

    #[test]
    fn empty_candidates_become_empty_result() {
        let err: RelayError =
            AiLlmError::from(ProviderError::new(ProviderErrorKind::EmptyCandidates)).into();
        assert!(matches!(err, RelayError::EmptyResult(_)));
    }

    #[test]
    fn decode_failures_become_protocol_errors() {
        let err: RelayError =
            AiLlmError::from(ProviderError::new(ProviderErrorKind::Decode("bad".into()))).into();
        assert!(matches!(err, RelayError::UpstreamProtocol(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn display_does_not_leak_upstream_detail() {
        let err: RelayError = AiLlmError::from(ProviderError::new(ProviderErrorKind::Decode(
            "secret-ish detail".into(),
        )))
        .into();
        assert!(!err.to_string().contains("secret-ish detail"));
    }
}
