//! Embeddings API Server Binary
//!
//! Composition root: loads configuration, initializes logging, loads the
//! embedding model (fatal if it cannot be loaded) and serves the HTTP API
//! until SIGINT/SIGTERM.

use embeddings_api::{
    api::{handlers::AppState, routes::build_router},
    config::Config,
    logging,
    model::{OnnxSentenceEncoder, SentenceEncoder},
};
use std::{net::SocketAddr, path::Path, sync::Arc, time::Instant};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration; a missing file falls back to defaults so the
    // service runs with just the model files in place.
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        Config::from_file_with_env(&config_path)?
    } else {
        let config = Config::default_config();
        config.validate()?;
        config
    };

    let _log_guard = logging::init(&config.logging);
    info!("Starting Embeddings API Server");

    // Model load failure is fatal; the process must not start without it.
    let load_started = Instant::now();
    let loaded = OnnxSentenceEncoder::load(&config.model)?;
    info!(
        model = loaded.model_name(),
        dimension = loaded.dimension(),
        elapsed_ms = load_started.elapsed().as_millis() as u64,
        "Model loaded"
    );
    let encoder: Arc<dyn SentenceEncoder> = Arc::new(loaded);

    let app = build_router(
        AppState { encoder },
        config.server.max_body_size_mb * 1024 * 1024,
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Starting graceful shutdown");
}
