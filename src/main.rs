use anyhow::{Context, Result};
use careview::api::create_router;
use careview::bootstrap::bootstrap;
use careview::config;
use careview::state::run_rotation;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "careview=info".into()),
        )
        .init();

    info!("Careview starting...");

    let config_path =
        std::env::var("CAREVIEW_CONFIG").unwrap_or_else(|_| "careview.toml".to_string());
    let config = config::load_or_default(&config_path)?;

    info!(
        port = config.server.port,
        rotation_interval_seconds = config.rotation.interval_seconds,
        step_goal = config.dashboard.step_goal,
        "Configuration loaded"
    );

    let boot = bootstrap(&config, Utc::now())?;
    let engine = Arc::new(boot.engine);

    // Start patient rotation
    let rotation_handle = tokio::spawn(run_rotation(
        Arc::clone(&engine),
        boot.rotation,
        boot.rng,
        config.rotation.interval_seconds,
    ));

    // Start HTTP API server
    let router = create_router(Arc::clone(&engine));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Dashboard API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Dashboard API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    rotation_handle.abort();
    info!("Careview stopped");

    Ok(())
}
