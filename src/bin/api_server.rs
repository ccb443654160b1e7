// API Server Binary Entry Point
//
// Purpose: Start the Axum API server around the farm risk scorer
// Usage: cargo run --features api --bin api_server

use farm_risk_scorer::{create_router, AppState, ServiceConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "farm_risk_scorer=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServiceConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  MODEL_DIR: {:?}", config.model_dir);
    tracing::info!("  POLICY_PATH: {:?}", config.policy_path);
    tracing::info!("  PORT: {}", config.port);

    // Load model, feature order and policy once for the process lifetime
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
