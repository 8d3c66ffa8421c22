//! CLI command implementations for keyseal.

pub mod config;
pub mod init;
pub mod issue;
pub mod serve;
pub mod verify;

use anyhow::Context;
use keyseal_core::KeysealConfig;
use keyseal_store::{KeyStore, create_store};
use std::path::Path;
use std::sync::Arc;

/// Load configuration from `path`, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> anyhow::Result<KeysealConfig> {
    KeysealConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Open the configured store and make sure the key collection exists.
async fn open_store(config: &KeysealConfig) -> anyhow::Result<Arc<dyn KeyStore>> {
    let store = create_store(&config.store)
        .await
        .with_context(|| format!("Failed to open key store at {}", config.store.path.display()))?;
    store
        .ensure_collection(&config.store.collection)
        .await
        .with_context(|| format!("Failed to prepare collection '{}'", config.store.collection))?;
    Ok(store)
}

#[cfg(test)]
pub(crate) mod test_support {
    use keyseal_core::{KeysealConfig, StoreBackend};
    use std::path::Path;

    /// SQLite-backed config rooted in `dir` with an inline secret.
    pub fn sqlite_config(dir: &Path) -> KeysealConfig {
        let mut config = KeysealConfig::default();
        config.signing.secret_env = None;
        config.signing.secret = Some("cli-test-secret".to_string());
        config.store.backend = StoreBackend::Sqlite;
        config.store.path = dir.join("keyseal.sqlite");
        config
    }
}
