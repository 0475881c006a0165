//! # Basket API Server
//!
//! Entry point: config → database → router → serve until Ctrl+C / SIGTERM.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing()            RUST_LOG or "info,basket=debug,sqlx=warn"   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceConfig::load()     defaults → basket.toml → BASKET_* env       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new()           SQLite pool + embedded migrations           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum::serve()             graceful shutdown, then pool close          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use basket_api::{create_router, AppState, ServiceConfig};
use basket_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Basket API server...");

    let config = ServiceConfig::load(None).context("Failed to load configuration")?;
    info!(
        addr = %config.server.bind_address(),
        db = %config.database.path.display(),
        depot_city = %config.depot.city,
        "Configuration loaded"
    );

    if let Some(parent) = config.database.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory {}", parent.display())
            })?;
        }
    }

    let db_config =
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections);
    let db = Database::new(db_config)
        .await
        .context("Failed to open database")?;

    let state = AppState::new(db.clone(), config.depot.address());
    let app = create_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Installs the fmt subscriber, filtered by `RUST_LOG` when set.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,basket=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
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
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
