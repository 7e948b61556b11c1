//! Server binary: reads config from env (and `.env`), prepares the SQLite store, serves the API.

use krishi_api::{app_router, connect, ensure_database_exists, ensure_tables, from_env, AppState, HuggingFaceGateway};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("krishi_api=info,krishi_server=info,tower_http=info")),
        )
        .init();

    let config = from_env()?;

    ensure_database_exists(&config.database_url).await?;
    let pool = connect(&config.database_url, 5).await?;
    ensure_tables(&pool).await?;

    if !config.inference.is_configured() {
        tracing::info!("HUGGINGFACE_API_TOKEN not set; AI features use local fallbacks");
    }
    let gateway = HuggingFaceGateway::new(config.inference.clone())?;
    let state = AppState::new(pool.clone(), Arc::new(gateway));
    let app = app_router(state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
