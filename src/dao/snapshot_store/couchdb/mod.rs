mod config;
mod error;
mod models;
mod store;

pub use config::{CouchConfig, Credentials};
pub use error::CouchDaoError;
pub use store::CouchSnapshotStore;

use crate::dao::storage::StorageError;

impl From<CouchDaoError> for StorageError {
    fn from(err: CouchDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
