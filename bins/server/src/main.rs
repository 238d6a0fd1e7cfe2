//! SOLVY API Server
//!
//! Main entry point for the SOLVY transparency backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solvy_api::{AppState, create_router};
use solvy_core::domain::DomainRegistry;
use solvy_db::connect_with_config;
use solvy_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solvy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect_with_config(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let domains = DomainRegistry::new(&config.domains);
    info!(
        root = domains.root(),
        subdomains = ?domains.subdomains(),
        enforce = config.domains.enforce,
        doh = %domains.dns().doh,
        ipv4 = ?domains.dns().ipv4,
        "Domain resolution configured"
    );

    match config.reporting.default_organization {
        Some(id) => info!(default_organization = %id, "Default reporting organization set"),
        None => info!("No default reporting organization; requests must name one"),
    }

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        domains: Arc::new(domains),
        default_organization: config.reporting.default_organization,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
