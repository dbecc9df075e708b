use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use tokio::fs;

use crate::dao::{
    snapshot_store::SnapshotStore,
    storage::{StorageError, StorageResult},
};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone)]
pub struct FileSnapshotStore {
    dir: Arc<Path>,
}

impl FileSnapshotStore {
    /// Use `dir` for snapshots; it is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        Self {
            dir: Arc::from(dir),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> BoxFuture<'static, StorageResult<Option<String>>> {
        let path = self.path_for(key);
        Box::pin(async move {
            match fs::read_to_string(&path).await {
                Ok(contents) => Ok(Some(contents)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StorageError::unavailable(
                    format!("reading {}", path.display()),
                    err,
                )),
            }
        })
    }

    fn store(&self, key: &str, value: String) -> BoxFuture<'static, StorageResult<()>> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        Box::pin(async move {
            fs::create_dir_all(&dir).await.map_err(|err| {
                StorageError::unavailable(format!("creating {}", dir.display()), err)
            })?;

            // Write next to the target and rename so readers never see half a snapshot.
            let staging = path.with_extension("json.tmp");
            fs::write(&staging, value).await.map_err(|err| {
                StorageError::unavailable(format!("writing {}", staging.display()), err)
            })?;
            fs::rename(&staging, &path).await.map_err(|err| {
                StorageError::unavailable(format!("replacing {}", path.display()), err)
            })
        })
    }
}
