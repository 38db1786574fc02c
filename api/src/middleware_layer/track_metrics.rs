use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::core::metrics::{HTTP_REQUEST_DURATION, HTTP_REQUESTS_TOTAL};

/// Records request count and latency, labelled by the matched route template
/// (raw path for unmatched requests).
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let endpoint = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };
    let method = req.method().to_string();

    let response = next.run(req).await;

    let latency = started.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method,
        "endpoint" => endpoint.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!(HTTP_REQUEST_DURATION, "endpoint" => endpoint).record(latency);

    response
}
