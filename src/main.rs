use anyhow::{Context, Result};
use event_discovery::{api, config::Config, FixtureDataset, QueryEngine};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("event_discovery=info".parse()?),
        )
        .init();

    info!("Starting event discovery API");

    // Load configuration from environment
    let config = Config::from_env()?;

    // The fixture is validated here; a bad fixture stops startup
    let dataset = FixtureDataset::load(config.events_fixture.as_deref())
        .context("Failed to load event fixture")?;
    info!(
        "Serving {} events (default locale: {})",
        dataset.len(),
        config.default_language
    );

    let engine = QueryEngine::new(Arc::new(dataset));
    let port = config.port;
    let app = api::router(api::AppState::new(engine, config));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
