//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, optional demo seeding, and the Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::entities::{Campaign, Link};
use crate::domain::repositories::CampaignStore;
use crate::error::AppError;
use crate::infrastructure::persistence::{FileCampaignStore, InMemoryCampaignStore, PgCampaignStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Id of the campaign created by `SEED_DEMO`.
pub const DEMO_CAMPAIGN_ID: &str = "abc123";

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured campaign store (memory, file, or PostgreSQL with migrations)
/// - The demo campaign, when `SEED_DEMO` is set
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "Campaign store ready");

    if config.seed_demo {
        seed_demo(store.as_ref()).await?;
    }

    let state = AppState::new(store);
    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the store backend selected by `STORE_BACKEND`.
///
/// PostgreSQL connections are retried with exponential backoff, then
/// pending migrations from `./migrations` are applied.
///
/// # Errors
///
/// Returns an error if the file store is unreadable, or if PostgreSQL is
/// unreachable after all retries or migrations fail.
pub async fn build_store(config: &Config) -> Result<Arc<dyn CampaignStore>> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryCampaignStore::new())),
        StoreBackend::File => {
            let store = FileCampaignStore::open(config.store_file.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to open store file: {}", e))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store backend")?;

            let options = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout));

            let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);
            let pool = Retry::spawn(strategy, || {
                let options = options.clone();
                async move {
                    options.connect(url).await.inspect_err(|e| {
                        tracing::warn!(error = %e, "Database connection attempt failed");
                    })
                }
            })
            .await
            .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgCampaignStore::new(Arc::new(pool))))
        }
    }
}

/// Creates the demo campaign `abc123` (google 10 / bing 20 / duckduckgo 70)
/// unless it already exists.
///
/// # Errors
///
/// Returns an error on store failures.
pub async fn seed_demo(store: &dyn CampaignStore) -> Result<(), AppError> {
    if store.get(DEMO_CAMPAIGN_ID).await?.is_some() {
        tracing::debug!("Demo campaign already present");
        return Ok(());
    }

    match store
        .create(Campaign::new(DEMO_CAMPAIGN_ID, "Demo", "MA"))
        .await
    {
        Ok(_) => {}
        // Another replica seeded it first.
        Err(AppError::Conflict { .. }) => return Ok(()),
        Err(e) => return Err(e),
    }

    for (url, weight) in [
        ("https://www.google.com", 10.0),
        ("https://www.bing.com", 20.0),
        ("https://duckduckgo.com", 70.0),
    ] {
        store
            .add_link(DEMO_CAMPAIGN_ID, Link::new(url, weight))
            .await?;
    }

    tracing::info!(id = DEMO_CAMPAIGN_ID, "Seeded demo campaign");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
