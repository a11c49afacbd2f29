use std::sync::Arc;

use quill_store::{ArticleStore, StoreError, StoreResult};

use crate::config::StatusPolicy;

/// Shared handler state: the storage gateway and the status policy.
///
/// Cloning is cheap; every clone points at the same store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ArticleStore>,
    policy: StatusPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>, policy: StatusPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Run a storage operation on the blocking thread pool.
    pub async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&dyn ArticleStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| StoreError::Backend(format!("storage task failed: {e}")))?
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
