//! # keyseal-store
//!
//! Persistence for [`KeyRecord`]s.
//!
//! The issuer and verifier only ever need three document-store operations, so
//! that is all the [`KeyStore`] trait exposes:
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | `ensure_collection` | Create the collection if it does not exist yet |
//! | `insert` | Append one record; visible to the next read once it returns |
//! | `find_by_public_key` | Every record whose `publicKey` equals the value |
//!
//! ## Backends
//!
//! - [`MemoryKeyStore`]: process-local, for tests and development
//! - [`SqliteKeyStore`]: SQLite via `sqlx`, one table per collection

pub mod error;
pub mod memory;
pub mod sqlite;

pub use error::StoreError;
pub use keyseal_core::KeyRecord;
pub use memory::MemoryKeyStore;
pub use sqlite::SqliteKeyStore;

use async_trait::async_trait;
use keyseal_core::{StoreBackend, StoreConfig};
use std::sync::Arc;

/// Trait for key record storage backends.
///
/// Implementations must guarantee read-after-write: once `insert` returns
/// `Ok`, a `find_by_public_key` issued afterwards (from any task) sees the
/// record. No uniqueness is enforced on `public_key`.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Create the collection if it is missing. Idempotent.
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError>;

    /// Store a record.
    async fn insert(&self, collection: &str, record: &KeyRecord) -> Result<(), StoreError>;

    /// Find all records with the given public key.
    async fn find_by_public_key(
        &self,
        collection: &str,
        public_key: &str,
    ) -> Result<Vec<KeyRecord>, StoreError>;
}

/// Create a storage backend based on configuration.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory key store; issued credentials are lost on exit");
            Ok(Arc::new(MemoryKeyStore::new()))
        }
        StoreBackend::Sqlite => Ok(Arc::new(SqliteKeyStore::open(&config.path).await?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        let store = create_store(&config).await.unwrap();
        store.ensure_collection("keys").await.unwrap();
        assert!(store.find_by_public_key("keys", "x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_sqlite_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            path: dir.path().join("nested").join("keys.sqlite"),
            ..Default::default()
        };
        let store = create_store(&config).await.unwrap();
        store.ensure_collection("keys").await.unwrap();
        assert!(config.path.exists());
    }
}
