//! SQLite key store.
//!
//! Each collection is a table:
//!
//! ```sql
//! CREATE TABLE keys (
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     public_key  TEXT NOT NULL,
//!     private_key TEXT NOT NULL
//! );
//! CREATE INDEX keys_public_key_idx ON keys (public_key);
//! ```
//!
//! The index is deliberately not `UNIQUE`; duplicate public keys are handled
//! by the verifier's exactly-one lookup rule.

use crate::error::{StoreError, validate_collection};
use crate::KeyStore;
use async_trait::async_trait;
use keyseal_core::KeyRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Key store backed by a SQLite database.
pub struct SqliteKeyStore {
    pool: SqlitePool,
}

impl SqliteKeyStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "Opened SQLite key store");
        Ok(Self { pool })
    }

    /// Private in-memory database. Useful in tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // Every connection to :memory: is a separate database, so pin exactly one.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Delete every record with the given public key, returning how many were deleted.
    pub async fn remove_by_public_key(
        &self,
        collection: &str,
        public_key: &str,
    ) -> Result<u64, StoreError> {
        validate_collection(collection)?;
        let sql = format!(r#"DELETE FROM "{collection}" WHERE public_key = ?"#);
        let result = sqlx::query(&sql)
            .bind(public_key)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl KeyStore for SqliteKeyStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;

        let create_table = format!(
            r#"CREATE TABLE IF NOT EXISTS "{collection}" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                public_key TEXT NOT NULL,
                private_key TEXT NOT NULL
            )"#
        );
        let create_index = format!(
            r#"CREATE INDEX IF NOT EXISTS "{collection}_public_key_idx" ON "{collection}" (public_key)"#
        );

        sqlx::query(&create_table).execute(&self.pool).await?;
        sqlx::query(&create_index).execute(&self.pool).await?;

        tracing::debug!(collection, "Ensured key collection exists");
        Ok(())
    }

    async fn insert(&self, collection: &str, record: &KeyRecord) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let sql = format!(r#"INSERT INTO "{collection}" (public_key, private_key) VALUES (?, ?)"#);

        // Autocommit: the row is durable once execute resolves.
        sqlx::query(&sql)
            .bind(&record.public_key)
            .bind(&record.private_key)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        Ok(())
    }

    async fn find_by_public_key(
        &self,
        collection: &str,
        public_key: &str,
    ) -> Result<Vec<KeyRecord>, StoreError> {
        validate_collection(collection)?;
        let sql = format!(
            r#"SELECT public_key, private_key FROM "{collection}" WHERE public_key = ? ORDER BY id"#
        );

        let rows = sqlx::query_as::<_, (String, String)>(&sql)
            .bind(public_key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(rows
            .into_iter()
            .map(|(public_key, private_key)| KeyRecord {
                public_key,
                private_key,
            })
            .collect())
    }
}

fn map_sqlx_error(collection: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.message().starts_with("no such table") {
            return StoreError::UnknownCollection(collection.to_string());
        }
    }
    StoreError::Database(err)
}
