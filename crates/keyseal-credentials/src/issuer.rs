//! Credential issuance.

use crate::claims::IdentityClaims;
use crate::error::IssueError;
use crate::keys::{RsaKeyPair, fingerprint};
use crate::token::TokenSigner;
use keyseal_core::{KeyRecord, SigningSecret};
use keyseal_store::KeyStore;
use std::sync::Arc;

/// A freshly issued credential.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    /// The signed identity token handed to the client.
    pub token: String,
    /// SPKI PEM embedded in the token.
    pub public_key: String,
}

/// Mints key pairs, persists them, and signs identity tokens.
#[derive(Clone)]
pub struct Issuer {
    store: Arc<dyn KeyStore>,
    collection: Arc<str>,
    signer: Arc<TokenSigner>,
}

impl Issuer {
    pub fn new(store: Arc<dyn KeyStore>, collection: &str, secret: &SigningSecret) -> Self {
        Self {
            store,
            collection: Arc::from(collection),
            signer: Arc::new(TokenSigner::new(secret)),
        }
    }

    /// Issue a new credential.
    ///
    /// Every call generates an unrelated key pair. The key record is written
    /// and acknowledged by the store before the token is signed, so a returned
    /// token is always verifiable.
    pub async fn issue(&self) -> Result<IssuedCredential, IssueError> {
        let keypair = tokio::task::spawn_blocking(RsaKeyPair::generate)
            .await
            .map_err(|e| IssueError::TaskAborted(e.to_string()))??;

        let public_key = keypair.public_key_pem()?;
        let private_key = keypair.private_key_pem()?;

        self.store
            .insert(&self.collection, &KeyRecord::new(&public_key, private_key))
            .await?;

        let token = self.signer.sign(&IdentityClaims::new(&public_key))?;

        tracing::info!(
            collection = %self.collection,
            key = %fingerprint(&public_key),
            "Issued credential"
        );

        Ok(IssuedCredential { token, public_key })
    }
}
