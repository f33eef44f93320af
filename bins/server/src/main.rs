//! Meridian API Server
//!
//! Main entry point for the budget comparison and forecast service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_api::{AppState, create_router};
use meridian_core::comparison::{BudgetComparisonStore, InMemoryComparisonStore};
use meridian_db::{BudgetComparisonRepository, connect};
use meridian_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    // An empty database URL runs against process memory, for local development
    let store: Arc<dyn BudgetComparisonStore> = if config.database.url.trim().is_empty() {
        warn!("No database configured, data will not survive a restart");
        Arc::new(InMemoryComparisonStore::new())
    } else {
        let db = connect(&config.database).await?;
        info!(
            max_connections = config.database.max_connections,
            "Connected to database"
        );
        Arc::new(BudgetComparisonRepository::new(db))
    };

    let jwt_service = JwtService::new(JwtConfig::from(config.jwt.clone()));
    let state = AppState::new(store, Arc::new(jwt_service));

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
