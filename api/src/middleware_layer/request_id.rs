use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const REQUEST_ID: &str = "x-request-id";

/// Reuse the caller's id when it is a sane header value, otherwise mint one.
fn resolve_request_id(req: &Request<Body>) -> HeaderValue {
    if let Some(h) = req.headers().get(REQUEST_ID) {
        if let Ok(v) = h.to_str() {
            if !v.trim().is_empty() && v.len() <= 128 {
                return h.clone();
            }
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    HeaderValue::from_str(&format!("req-{nanos}"))
        .unwrap_or(HeaderValue::from_static("req-unknown"))
}

/// Tags every request with `X-Request-Id`, runs the handler inside a span
/// carrying that id, and logs one line per completed request.
pub async fn stamp_request_id(req: Request<Body>, next: Next) -> Response {
    let id = resolve_request_id(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let span = info_span!(
        "http",
        request_id = id.to_str().unwrap_or_default(),
        %method,
        %path
    );

    let mut res = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = res.status().as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "request completed"
        );
    });

    res.headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID), id);
    res
}
