use crate::error::ServerError;
use keyseal_core::KeysealConfig;
use keyseal_credentials::{Issuer, Verifier};
use keyseal_store::{KeyStore, create_store};
use std::sync::Arc;

/// Shared application state.
///
/// The signing secret is resolved once here and captured by the issuer and
/// verifier; it is read-only for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Issuer,
    pub verifier: Verifier,
    pub config: Arc<KeysealConfig>,
}

impl AppState {
    /// Build state around an existing store.
    pub fn new(config: KeysealConfig, store: Arc<dyn KeyStore>) -> Result<Self, ServerError> {
        let secret = config.signing.resolve_secret()?;
        let collection = config.store.collection.as_str();

        Ok(Self {
            issuer: Issuer::new(store.clone(), collection, &secret),
            verifier: Verifier::new(store, collection, &secret),
            config: Arc::new(config),
        })
    }

    /// Open the configured store, make sure the key collection exists, and
    /// build state around it.
    pub async fn init(config: KeysealConfig) -> Result<Self, ServerError> {
        let store = create_store(&config.store).await?;
        store.ensure_collection(&config.store.collection).await?;
        tracing::info!(
            backend = ?config.store.backend,
            collection = %config.store.collection,
            "Key store ready"
        );
        Self::new(config, store)
    }
}
