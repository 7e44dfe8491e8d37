//! Daemon context - shared state for request handlers
//!
//! DaemonContext is built once at startup and handed to every handler
//! through axum's `State`.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, TaskpadError};
use crate::storage::JsonFileStorage;
use crate::store::{TaskRecord, TaskStore};

/// Shared context for all daemon request handlers
#[derive(Debug, Clone)]
pub struct DaemonContext {
    /// The task store, loaded from its snapshot at startup
    pub store: Arc<TaskStore>,
}

impl DaemonContext {
    /// Wrap an already opened store
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    /// Open the store backed by the tasks file at `tasks_file`
    pub fn open(tasks_file: &Path) -> Self {
        Self::new(Arc::new(TaskStore::open(JsonFileStorage::new(tasks_file))))
    }

    /// Run a store operation on the blocking pool.
    ///
    /// The store lock and the snapshot write are synchronous, so each request
    /// gets its own blocking thread instead of stalling the async workers.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&TaskStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| TaskpadError::Storage(format!("store operation did not complete: {}", e)))?
    }

    /// Convenience: current snapshot of all tasks
    pub async fn list(&self) -> Result<Vec<TaskRecord>> {
        self.with_store(|store| store.list()).await
    }
}
