use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use summarizer_relay::config::app::{load_env_file, Config};
use summarizer_relay::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before tracing so RUST_LOG can come from .env.
    let env_file = load_env_file().context("Error loading .env file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match env_file {
        Some(path) => tracing::info!("Loaded environment from {}", path.display()),
        None => tracing::warn!("No .env file found, using process environment only"),
    }

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let addr = config.server_addr();
    let port = config.port;
    let router = app(AppState::new(config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server running at http://localhost:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
