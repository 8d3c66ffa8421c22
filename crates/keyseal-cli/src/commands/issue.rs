//! `keyseal issue` - Issue a credential directly against the configured store.

use anyhow::Context;
use keyseal_core::KeysealConfig;
use keyseal_credentials::{IssuedCredential, Issuer, keys::fingerprint};
use std::fs;
use std::path::Path;

/// Issue a credential and print the token, or write it to `output`.
pub async fn run(config: &KeysealConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let credential = issue(config).await?;

    match output {
        Some(path) => {
            fs::write(path, &credential.token)
                .with_context(|| format!("Failed to write token to {}", path.display()))?;
            println!("✔ Issued credential");
            println!("  Token: {}", path.display());
            println!("  Key:   {}", fingerprint(&credential.public_key));
        }
        None => println!("{}", credential.token),
    }

    Ok(())
}

pub async fn issue(config: &KeysealConfig) -> anyhow::Result<IssuedCredential> {
    let secret = config
        .signing
        .resolve_secret()
        .context("Signing secret not available. Set KEYSEAL_JWT_SECRET or signing.secret in the config")?;
    let store = super::open_store(config).await?;

    Issuer::new(store, &config.store.collection, &secret)
        .issue()
        .await
        .context("Failed to issue credential")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::sqlite_config;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_issue_writes_token_file() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());
        let output = dir.path().join("token.jwt");

        run(&config, Some(&output)).await.unwrap();

        let token = fs::read_to_string(&output).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn test_issue_without_secret_fails() {
        let dir = tempdir().unwrap();
        let mut config = sqlite_config(dir.path());
        config.signing.secret = None;

        assert!(issue(&config).await.is_err());
    }
}
