//! Dossier API Server
//!
//! Main entry point for the contact and document service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dossier_api::{AppState, create_router};
use dossier_core::storage::{StorageConfig, StorageService};
use dossier_db::connect_with_pool;
use dossier_shared::{AppConfig, JwtConfig, JwtService, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dossier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("failed to connect to database")?;
    info!("Connected to database");

    let storage = build_storage(&config.storage);

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.auth.secret.clone(),
        issuer: config.auth.issuer.clone(),
        ..JwtConfig::default()
    });

    let state = AppState {
        db: Arc::new(db.clone()),
        jwt_service: Arc::new(jwt_service),
        storage,
        max_body_bytes: config.server.max_body_bytes,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("Server stopped");
    Ok(())
}

/// Blob storage is optional at startup. Without it the record routes work
/// and every blob route answers `storage_not_configured`.
fn build_storage(settings: &StorageSettings) -> Option<Arc<StorageService>> {
    let Some(config) = StorageConfig::from_settings(settings) else {
        warn!(
            provider = settings.provider_kind(),
            "Blob storage not configured; file routes will fail"
        );
        return None;
    };

    match StorageService::from_config(config) {
        Ok(service) => {
            info!(
                provider = service.provider_name(),
                bucket = service.bucket(),
                "Blob storage configured"
            );
            Some(Arc::new(service))
        }
        Err(e) => {
            warn!(error = %e, "Blob storage failed to initialize; file routes will fail");
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
