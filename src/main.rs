use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use networth_api::config::Config;
use networth_api::services::networth::HttpNetworthEngine;
use networth_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("networth_api=debug,tower_http=debug")),
        )
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let engine = HttpNetworthEngine::new(config.calculator_url)?;
    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = networth_api::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Running on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
