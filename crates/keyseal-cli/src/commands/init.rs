//! `keyseal init` - Prepare a keyseal deployment.
//!
//! Writes a default configuration file when none exists, then makes sure the
//! configured key collection and its public key index exist.

use anyhow::Context;
use keyseal_core::KeysealConfig;
use std::fs;
use std::path::Path;

pub async fn run(config_path: &Path, config: &KeysealConfig) -> anyhow::Result<()> {
    if !config_path.exists() {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(config_path, config.to_yaml()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("✔ Wrote default configuration: {}", config_path.display());
    }

    super::open_store(config).await?;
    println!(
        "✔ Key collection '{}' ready ({:?} backend)",
        config.store.collection, config.store.backend
    );

    if config.signing.resolve_secret().is_err() {
        println!();
        println!("⚠️  No signing secret configured. Set it before serving:");
        if let Some(var) = &config.signing.secret_env {
            println!("  export {var}=<secret>");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::sqlite_config;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_writes_config_and_database() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());
        let config_path = dir.path().join("conf").join("keyseal.yaml");

        run(&config_path, &config).await.unwrap();

        assert!(config_path.exists());
        assert!(config.store.path.exists());

        let written = KeysealConfig::from_file(&config_path).unwrap();
        assert_eq!(written.store.collection, config.store.collection);
        assert!(written.signing.secret.is_none());
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());
        let config_path = dir.path().join("keyseal.yaml");

        run(&config_path, &config).await.unwrap();
        let first = fs::read_to_string(&config_path).unwrap();
        run(&config_path, &config).await.unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), first);
    }
}
