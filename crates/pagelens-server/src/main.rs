// Entry point for the pagelens HTTP server

use anyhow::{Context, Result};
use pagelens_server::{AppState, Config, app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pagelens=info,pagelens_core=info,pagelens_server=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to initialize server state")?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("pagelens server listening on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
