/// Persisted entity definitions.
pub mod models;
/// Key/value stores holding the board snapshot.
pub mod snapshot_store;
/// Storage error types shared by every backend.
pub mod storage;
