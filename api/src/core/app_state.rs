use metrics_exporter_prometheus::PrometheusHandle;
use thiserror::Error;
use tutor::Tutor;

/// Default listen port when neither `API_ADDRESS` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared state for all HTTP handlers.
///
/// Built once at startup and never mutated; handlers receive it as
/// `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    /// Relay to the generative-language API (holds the credential).
    pub tutor: Tutor,
    /// Renders the process-wide Prometheus registry.
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(tutor: Tutor, metrics: PrometheusHandle) -> Self {
        Self { tutor, metrics }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: expected 1..=65535")]
    InvalidPort(String),
}

/// Listener configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address passed to `TcpListener::bind`, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Precedence: `API_ADDRESS` verbatim, then `0.0.0.0:{PORT}`, then the default port.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("API_ADDRESS").filter(|a| !a.trim().is_empty()) {
            return Ok(Self {
                bind_addr: addr.trim().to_string(),
            });
        }

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(p) if p != 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bind_addr: format!("0.0.0.0:{port}"),
        })
    }
}
