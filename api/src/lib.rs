//! HTTP surface of the study relay.
//!
//! | route | handler |
//! |---|---|
//! | `GET /health`, `GET /api/health` | liveness, never calls upstream |
//! | `GET /api/topics` | static topic catalog |
//! | `POST /api/ask` | one question → one upstream call |
//! | `GET /metrics` | Prometheus scrape |

pub mod core {
    pub mod app_state;
    pub mod metrics;
}
pub mod error_handler;
mod middleware_layer {
    pub mod request_id;
    pub mod track_metrics;
}
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tutor::Tutor;

use crate::{
    core::app_state::{AppState, ServerConfig},
    error_handler::AppError,
    routes::{
        ask::ask_question_route::ask_question, health_route::health,
        metrics_route::render_metrics, not_found, topics_route::list_topics,
    },
};

pub use crate::middleware_layer::request_id::REQUEST_ID;

/// Builds the full router for the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api = Router::new()
        .route("/health", get(health))
        .route("/topics", get(list_topics))
        .route("/ask", post(ask_question));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn(middleware_layer::track_metrics::track_metrics))
        .layer(middleware::from_fn(middleware_layer::request_id::stamp_request_id))
        .layer(cors)
        .with_state(state)
}

/// Loads config from the environment, builds the relay and serves until Ctrl+C.
///
/// # Errors
/// Fails before binding when `GEMINI_API_KEY` is missing or any setting is
/// malformed; afterwards only on bind/serve I/O errors.
pub async fn start() -> Result<(), AppError> {
    let server_cfg = ServerConfig::from_env()?;
    let tutor = Tutor::from_env()?;
    info!(model = %tutor.model(), "relay configured");

    let metrics = core::metrics::install_recorder()?;

    serve(server_cfg, AppState::new(tutor, metrics)).await
}

/// Binds `cfg.bind_addr` and serves the router with graceful shutdown.
pub async fn serve(cfg: ServerConfig, state: AppState) -> Result<(), AppError> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: cfg.bind_addr.clone(),
            source,
        })?;

    info!(addr = %cfg.bind_addr, "relay listening");
    info!("API: http://{}/api", cfg.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("relay stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
