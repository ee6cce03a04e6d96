//! Marketplace integration server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marketplace_integration::adapters::http::{integration_router, IntegrationAppState};
use marketplace_integration::adapters::{
    HttpMarketplaceClient, InMemorySubscriberStore, PostgresSubscriberStore,
};
use marketplace_integration::application::EventDispatcher;
use marketplace_integration::config::{AppConfig, DatabaseConfig};
use marketplace_integration::ports::SubscriberStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let store = build_store(config.database.as_ref()).await?;
    let marketplace = Arc::new(HttpMarketplaceClient::from_config(&config.marketplace)?);
    let dispatcher = EventDispatcher::new(marketplace, store, config.marketplace.base_url.clone());

    let app = integration_router()
        .with_state(IntegrationAppState::new(dispatcher))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Marketplace integration listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_store(
    database: Option<&DatabaseConfig>,
) -> Result<Arc<dyn SubscriberStore>, Box<dyn std::error::Error>> {
    let Some(database) = database else {
        info!("No database configured, using in-memory subscriber store");
        return Ok(Arc::new(InMemorySubscriberStore::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    let store = PostgresSubscriberStore::new(pool);
    if database.run_migrations {
        store.migrate().await?;
        info!("Database migrations applied");
    }
    Ok(Arc::new(store))
}

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
