//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur during key record storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection was never created with `ensure_collection`.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Collection names end up in SQL and must be plain identifiers.
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),

    /// Storage error.
    #[error("storage error: {0}")]
    StorageError(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn validate_collection(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}
