use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;

use crate::dao::{snapshot_store::SnapshotStore, storage::StorageResult};

/// Process-local store; snapshots are lost on restart.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<DashMap<String, String>>,
}

impl MemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value under `key`, bypassing the async interface.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let value = self.get(key);
        Box::pin(async move { Ok(value) })
    }

    fn store(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        self.entries.insert(key.to_string(), value);
        Box::pin(async { Ok(()) })
    }
}
