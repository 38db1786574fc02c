//! Prometheus metrics for the relay.
//!
//! | metric | labels |
//! |---|---|
//! | `http_requests_total` | `method`, `endpoint`, `status` |
//! | `http_request_duration_seconds` | `endpoint` |
//! | `chat_messages_total` | `topic` |
//! | `gemini_errors_total` | |

use std::sync::OnceLock;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::warn;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const CHAT_MESSAGES_TOTAL: &str = "chat_messages_total";
pub const GEMINI_ERRORS_TOTAL: &str = "gemini_errors_total";

/// Topic label used when a question carries no topic.
pub const NO_TOPIC_LABEL: &str = "general";

const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Installs the process-wide Prometheus recorder on first call and returns a
/// handle for rendering. Later calls reuse the same recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = HANDLE.get() {
        return Ok(handle.clone());
    }

    let recorder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION.to_string()),
            LATENCY_BUCKETS,
        )?
        .build_recorder();

    let handle = HANDLE.get_or_init(move || {
        let handle = recorder.handle();
        if let Err(e) = metrics::set_global_recorder(recorder) {
            warn!(error = %e, "another metrics recorder is already installed");
        }
        handle
    });
    Ok(handle.clone())
}

/// Counts one relayed question and, when it failed upstream, one Gemini error.
pub fn record_ask(topic: Option<&str>, upstream_failed: bool) {
    let topic = topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_TOPIC_LABEL)
        .to_string();
    metrics::counter!(CHAT_MESSAGES_TOTAL, "topic" => topic).increment(1);

    if upstream_failed {
        metrics::counter!(GEMINI_ERRORS_TOTAL).increment(1);
    }
}
