//! `keyseal verify` - Check a token against the configured store.

use anyhow::Context;
use keyseal_core::KeysealConfig;
use keyseal_credentials::{Verification, Verifier};
use std::fs;
use std::path::Path;

/// Verify a token (or a file containing one). Prints `authorized` or
/// `rejected` and returns whether the token was authorized.
pub async fn run(config: &KeysealConfig, token: &str) -> anyhow::Result<bool> {
    let token = if Path::new(token).is_file() {
        fs::read_to_string(token)
            .with_context(|| format!("Failed to read token from {token}"))?
            .trim()
            .to_string()
    } else {
        token.trim().to_string()
    };

    let secret = config
        .signing
        .resolve_secret()
        .context("Signing secret not available. Set KEYSEAL_JWT_SECRET or signing.secret in the config")?;
    let store = super::open_store(config).await?;
    let verifier = Verifier::new(store, &config.store.collection, &secret);

    match verifier.verify(Some(&token)).await {
        Verification::Authorized(key) => {
            println!("authorized");
            tracing::info!(key = %key.fingerprint, "Token authorized");
            Ok(true)
        }
        Verification::Rejected => {
            println!("rejected");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::issue;
    use crate::commands::test_support::sqlite_config;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_issued_token_verifies_across_invocations() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());

        let credential = issue::issue(&config).await.unwrap();
        assert!(run(&config, &credential.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_token_read_from_file() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());
        let output = dir.path().join("token.jwt");

        issue::run(&config, Some(&output)).await.unwrap();
        assert!(run(&config, output.to_str().unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let dir = tempdir().unwrap();
        let config = sqlite_config(dir.path());

        assert!(!run(&config, "not-a-token").await.unwrap());
    }

    #[tokio::test]
    async fn test_other_store_rejects() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();

        let credential = issue::issue(&sqlite_config(first.path())).await.unwrap();
        assert!(!run(&sqlite_config(second.path()), &credential.token).await.unwrap());
    }
}
