#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod file;
pub mod memory;

use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// String key/value store holding serialized snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Read the value stored under `key`, `None` when it was never written.
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>>;
    /// Replace the value stored under `key`.
    fn store(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>>;
}
