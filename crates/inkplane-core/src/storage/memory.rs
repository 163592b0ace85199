//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::snapshot::SceneSnapshot;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, SceneSnapshot>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, snapshot: &SceneSnapshot) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let snapshot = snapshot.clone();
        Box::pin(async move {
            let mut store = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            store.insert(id, snapshot);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SceneSnapshot>> {
        let id = id.to_string();
        Box::pin(async move {
            let store = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            store.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut store = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            store.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let store = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(store.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let store = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(store.contains_key(&id))
        })
    }
}
