//! persona-quiz HTTP API server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tower_http::trace::TraceLayer;

use persona_quiz::server::{AppState, Config, init_logging, router};

/// persona-quiz HTTP API server.
#[derive(Parser, Debug)]
#[command(name = "persona-quiz-server")]
#[command(about = "HTTP API for the personality quizzes and their history")]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "persona-quiz-server.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logging setup needs the config, so load it first.
    let config = Config::from_file(&args.config)?;
    init_logging(&config.logging)?;

    tracing::info!(path = %config.store.path, "opening history store");
    let state = AppState::from_config(&config)?;

    if config.cors.enabled {
        tracing::info!(origins = config.cors.allow_origins.len(), "CORS enabled");
    } else {
        tracing::info!("CORS disabled (denying cross-origin requests)");
    }

    let app = router(state)
        .layer(config.cors.layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
