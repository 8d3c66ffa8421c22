//! In-memory key store.

use crate::error::{StoreError, validate_collection};
use crate::KeyStore;
use async_trait::async_trait;
use keyseal_core::KeyRecord;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local key store.
///
/// Every operation takes the lock for its whole duration, so an insert is
/// visible to any read that starts after it returns.
#[derive(Default)]
pub struct MemoryKeyStore {
    collections: RwLock<HashMap<String, Vec<KeyRecord>>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every record with the given public key, returning how many were removed.
    pub fn remove_by_public_key(
        &self,
        collection: &str,
        public_key: &str,
    ) -> Result<usize, StoreError> {
        let mut collections = self.collections.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let records = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        let before = records.len();
        records.retain(|r| r.public_key != public_key);
        Ok(before - records.len())
    }

    /// Number of records in a collection (zero if it does not exist).
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;

        let mut collections = self.collections.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;
        collections.entry(collection.to_string()).or_default();
        Ok(())
    }

    async fn insert(&self, collection: &str, record: &KeyRecord) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?
            .push(record.clone());
        Ok(())
    }

    async fn find_by_public_key(
        &self,
        collection: &str,
        public_key: &str,
    ) -> Result<Vec<KeyRecord>, StoreError> {
        let collections = self.collections.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        let records = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        Ok(records
            .iter()
            .filter(|r| r.public_key == public_key)
            .cloned()
            .collect())
    }
}
