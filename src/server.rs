//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, sweeper spawning, and the Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::{Config, StorageConfig};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::store::{MemoryStore, RedisStore, RedisStoreOptions, run_sweeper};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the storage backend selected by `config`.
///
/// For the memory backend this also spawns the expiry sweeper, so it must be
/// called from within a Tokio runtime.
///
/// # Errors
///
/// Returns an error if the Redis backend cannot be reached. Callers must
/// treat this as fatal: there is no fallback to another backend.
pub async fn build_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    match &config.storage {
        StorageConfig::Memory => {
            let store = Arc::new(MemoryStore::new());
            tokio::spawn(run_sweeper(store.clone(), config.memory_sweep_interval()));
            tracing::info!("Using in-memory storage");
            Ok(store)
        }
        StorageConfig::Redis { url } => {
            let options = RedisStoreOptions {
                operation_timeout: config.store_timeout(),
                connect_retries: config.redis_connect_retries,
                key_prefix: config.redis_key_prefix.clone(),
            };

            let store = RedisStore::connect(url, options)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Using Redis storage");
            Ok(Arc::new(store))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (Redis or memory)
/// - Link service and shared state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The storage backend cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let link_service = Arc::new(LinkService::new(store, config.link_ttl_seconds));
    let state = AppState::new(link_service)
        .with_public_base_url(config.public_base_url.clone())
        .with_behind_proxy(config.behind_proxy);

    let app = app_router(state);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("URL shortener listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Config {
        Config {
            storage: StorageConfig::Memory,
            listen_addr: "127.0.0.1:0".to_string(),
            public_base_url: None,
            behind_proxy: false,
            link_ttl_seconds: 60,
            store_timeout_ms: 100,
            redis_connect_retries: 0,
            redis_key_prefix: String::new(),
            memory_sweep_interval_seconds: 60,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_memory_store() {
        let store = build_store(&memory_config()).await.unwrap();
        assert_eq!(store.kind(), "memory");
    }

    #[tokio::test]
    async fn test_build_store_fails_for_unusable_redis_url() {
        let mut config = memory_config();
        config.storage = StorageConfig::Redis {
            url: "redis://".to_string(),
        };

        assert!(build_store(&config).await.is_err());
    }
}
