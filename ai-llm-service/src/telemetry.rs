//! Tracing setup shared by the workspace binaries.
//!
//! The relay logs request handling (`api`), prompt relaying (`tutor`) and the
//! upstream exchange (`ai_llm_service`). [`layer`] renders those events in a
//! compact RFC 3339 format; [`env_filter`] builds the matching filter.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets whose events the relay layer renders.
pub const RELAY_TARGETS: &[&str] = &["ai_llm_service", "tutor", "api", "study_chat_backend"];

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Formatting layer that only renders events emitted under `targets`.
///
/// Compact single-line output with level, target and `file:line`. ANSI colors
/// only when stdout is a terminal. The per-layer filter leaves logs from other
/// crates (hyper, reqwest) to whatever else is installed.
pub fn layer<S>(targets: &'static [&'static str]) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_ours = filter::filter_fn(move |meta| is_relay_target(targets, meta.target()));

    fmt::layer()
        .with_ansi(use_ansi)
        .event_format(event_format())
        .with_filter(only_ours)
}

// `event_format` replaces the layer's whole formatter, so the timer and the
// field toggles live on the format itself.
fn event_format() -> fmt::format::Format<fmt::format::Compact, ChronoRfc3339Utc> {
    fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true)
}

/// `RUST_LOG` if set and valid, otherwise `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn is_relay_target(targets: &[&str], target: &str) -> bool {
    targets.iter().any(|prefix| {
        target == *prefix
            || target
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}
