use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use llm_simulator::config::{Cli, Config};
use llm_simulator::server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "llm_simulator=debug,tower_http=debug"
    } else {
        "llm_simulator=info,tower_http=info"
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }

    info!("llm-simulator v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration.
    let config = Config::from_cli(&cli)?;

    info!(
        models = ?config.simulation.models,
        stream_chunk_delay_ms = config.simulation.stream_chunk_delay_ms,
        response_delay_ms = config.simulation.response_delay_ms,
        error_rate = config.simulation.error_rate,
        "Configuration loaded"
    );

    if cli.reload {
        warn!("--reload is not handled in-process; run under cargo-watch for auto-restart");
    }

    let state = Arc::new(AppState::new(&config)?);
    let app = build_router(state);

    // Start the server.
    let listen_addr = config.server.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr}");
    info!("OpenAI-compatible API available at http://{listen_addr}/v1");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
