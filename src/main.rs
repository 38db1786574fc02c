use std::error::Error;

use ai_llm_service::telemetry;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    // Real environment variables take precedence.
    let dotenv = dotenvy::dotenv();

    let subscriber = tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer(telemetry::RELAY_TARGETS));

    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = &dotenv {
        if !e.not_found() {
            error!(error = %e, ".env file is present but unreadable");
        }
    }

    if let Err(e) = api::start().await {
        error!(error = %e, "relay terminated");
        return Err(e.into());
    }

    Ok(())
}
