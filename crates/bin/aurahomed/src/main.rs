//! # aurahomed: aurahome daemon
//!
//! Composition root that wires the core together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize `tracing` logging
//! - Construct the event bus and the layout service
//! - Load the initial layout document, if one is configured
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use aurahome_adapter_http_axum::state::AppState;
use aurahome_app::event_bus::InProcessEventBus;
use aurahome_domain::layout::HomeLayout;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Event bus + services
    let event_bus = Arc::new(InProcessEventBus::new(config.layout.event_capacity));
    let state = AppState::new(event_bus);

    if let Some(path) = &config.layout.path {
        let layout = read_layout(path).await?;
        state.layout_service.load_layout(layout).await?;
    } else {
        tracing::info!("no layout configured, waiting for PUT /api/layout");
    }

    // HTTP
    let app = aurahome_adapter_http_axum::router::build(state);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "aurahomed listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("aurahomed stopped");
    Ok(())
}

async fn read_layout(path: &Path) -> Result<HomeLayout, Box<dyn std::error::Error>> {
    let text = tokio::fs::read_to_string(path).await?;
    let layout = HomeLayout::from_json(&text)?;
    tracing::info!(path = %path.display(), rooms = layout.rooms.len(), "read layout document");
    Ok(layout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
