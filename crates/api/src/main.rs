use anyhow::{Context, Result};
use viewport_api::{build_app, ApiConfig};
use viewport_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("viewport_api");

    let config = ApiConfig::from_env().context("invalid viewport api configuration")?;
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(bind = %config.bind, "viewport api started");

    axum::serve(listener, app).await?;
    Ok(())
}
