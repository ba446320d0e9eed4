//! Switchboard - chat gateway across multiple AI providers
//!
//! This is the main entry point for the Switchboard server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};

use switchboard::{routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let default_filter = if config.debug_enabled {
        "switchboard=debug,tower_http=debug"
    } else {
        "switchboard=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Switchboard chat gateway");

    // Initialize metrics
    routes::metrics::init_metrics()?;
    info!("Metrics initialized");

    // Initialize application state
    let state = Arc::new(AppState::new(config.clone())?);
    log_startup_banner(&state);

    // Build the router
    let app = routes::create_router(state.clone());

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {}", addr);

    // Create listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        uptime_secs = state.start_time.elapsed().as_secs(),
        "Switchboard shutdown complete"
    );
    Ok(())
}

/// Log which models are live and which will answer in mock mode
fn log_startup_banner(state: &AppState) {
    let registry = &state.registry;
    let configured = state.credentials.configured_ids(registry);

    info!(
        "Available models: {}",
        registry.all_model_ids().join(", ")
    );
    info!(
        "Configured models: {}/{}",
        configured.len(),
        registry.len()
    );

    for descriptor in registry.descriptors() {
        if state.credentials.is_configured(&descriptor.id) {
            info!(model = %descriptor.id, "{} ready", descriptor.display_name);
        } else {
            info!(
                model = %descriptor.id,
                "{} in mock mode (set {})",
                descriptor.display_name,
                descriptor.credential_env_name
            );
        }
    }

    if configured.is_empty() {
        warn!("No API keys configured, every model will answer with mock responses");
    }
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown");
        }
    }
}
