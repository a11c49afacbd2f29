use std::sync::Arc;

use quill_store::{ArticleStore, InMemoryArticleStore, RedbArticleStore};
use tokio::net::TcpListener;

use crate::config::{ServerConfig, StorageBackend, StorageConfig};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Quill article server.
pub struct QuillServer {
    config: ServerConfig,
}

impl QuillServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the configured storage backend.
    pub fn open_store(storage: &StorageConfig) -> ServerResult<Arc<dyn ArticleStore>> {
        match storage.backend {
            StorageBackend::Disk => Ok(Arc::new(RedbArticleStore::open(&storage.data_dir)?)),
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; articles are lost on exit");
                Ok(Arc::new(InMemoryArticleStore::new()))
            }
        }
    }

    /// Build the router over an already opened store (useful for testing).
    pub fn router(&self, store: Arc<dyn ArticleStore>) -> axum::Router {
        build_router(AppState::new(store, self.config.error_status))
    }

    /// Open storage and serve requests until a shutdown signal arrives.
    ///
    /// Fails before binding if the store cannot be opened.
    pub async fn serve(self) -> ServerResult<()> {
        let store = Self::open_store(&self.config.storage)?;
        let app = self.router(store);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Quill server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        // The router, and with it the last store handle, is gone once serve
        // returns.
        tracing::info!("storage closed");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
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
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusPolicy;

    #[test]
    fn server_construction() {
        let server = QuillServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(server.config().error_status, StatusPolicy::Compat);
    }

    #[test]
    fn open_disk_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageConfig {
            backend: StorageBackend::Disk,
            data_dir: dir.path().join("db"),
        };
        let store = QuillServer::open_store(&storage).unwrap();
        assert!(store.get_all().unwrap().is_empty());
        assert!(dir.path().join("db").join(quill_store::DATABASE_FILE).exists());
    }

    #[test]
    fn open_store_failure_is_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let storage = StorageConfig {
            backend: StorageBackend::Disk,
            data_dir: blocker.join("db"),
        };
        let err = QuillServer::open_store(&storage).err().unwrap();
        assert!(matches!(err, ServerError::Store(_)));
    }

    #[tokio::test]
    async fn serve_fails_when_store_cannot_open() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut config = ServerConfig::default();
        config.bind_addr = "127.0.0.1:0".parse().unwrap();
        config.storage.data_dir = blocker.join("db");
        assert!(QuillServer::new(config).serve().await.is_err());
    }
}
