//! Credential verification.
//!
//! A presented token is authorized only when every step passes, in order:
//!
//! 1. The token decodes and its HS256 signature checks out.
//! 2. It carries a non-empty `publicKey` claim.
//! 3. Exactly one stored key record has that public key.
//! 4. The stored private key signs the claimed public key (RSA-SHA256) and the
//!    claimed public key verifies that signature.
//!
//! Any failure, including store or crypto errors, yields
//! [`Verification::Rejected`]. The reason is logged at debug level and is
//! never returned to the caller.

use crate::error::RejectReason;
use crate::keys::{fingerprint, parse_private_key_pem, parse_public_key_pem, sign_sha256, verify_sha256};
use crate::token::TokenDecoder;
use keyseal_core::{KeyRecord, SigningSecret};
use keyseal_store::KeyStore;
use std::sync::Arc;

/// Outcome of a verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The bearer holds a credential issued by this service.
    Authorized(AuthenticatedKey),
    /// Anything else.
    Rejected,
}

impl Verification {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Verification::Authorized(_))
    }
}

/// The public key of an authorized bearer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedKey {
    /// SPKI PEM from the token.
    pub public_key: String,
    /// Short log-safe identifier of the key.
    pub fingerprint: String,
}

/// Authenticates presented identity tokens against stored key records.
#[derive(Clone)]
pub struct Verifier {
    store: Arc<dyn KeyStore>,
    collection: Arc<str>,
    decoder: Arc<TokenDecoder>,
}

impl Verifier {
    pub fn new(store: Arc<dyn KeyStore>, collection: &str, secret: &SigningSecret) -> Self {
        Self {
            store,
            collection: Arc::from(collection),
            decoder: Arc::new(TokenDecoder::new(secret)),
        }
    }

    /// Verify a token. `None` (no token presented) is rejected.
    pub async fn verify(&self, token: Option<&str>) -> Verification {
        match self.check(token).await {
            Ok(key) => {
                tracing::debug!(key = %key.fingerprint, "Credential authorized");
                Verification::Authorized(key)
            }
            Err(reason) => {
                tracing::debug!(%reason, "Credential rejected");
                Verification::Rejected
            }
        }
    }

    pub(crate) async fn check(&self, token: Option<&str>) -> Result<AuthenticatedKey, RejectReason> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RejectReason::DecodeFailed("no token presented".to_string()))?;

        let claims = self
            .decoder
            .decode(token)
            .map_err(|e| RejectReason::DecodeFailed(e.to_string()))?;

        let public_key = claims.public_key().ok_or(RejectReason::ClaimMissing)?;

        let mut records = self
            .store
            .find_by_public_key(&self.collection, public_key)
            .await?;

        let record = match records.len() {
            0 => return Err(RejectReason::LookupNotFound),
            1 => records.remove(0),
            n => return Err(RejectReason::LookupAmbiguous(n)),
        };

        self_check(&record, public_key)?;

        Ok(AuthenticatedKey {
            public_key: public_key.to_string(),
            fingerprint: fingerprint(public_key),
        })
    }
}

/// Sign the claimed public key with the stored private key, then verify with
/// the claimed public key.
fn self_check(record: &KeyRecord, claimed_public_key: &str) -> Result<(), RejectReason> {
    let payload = claimed_public_key.as_bytes();

    let private_key = parse_private_key_pem(&record.private_key)?;
    let signature = sign_sha256(&private_key, payload)?;

    let public_key = parse_public_key_pem(claimed_public_key)?;
    verify_sha256(&public_key, payload, &signature)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::IdentityClaims;
    use crate::issuer::Issuer;
    use crate::keys::RsaKeyPair;
    use crate::token::TokenSigner;
    use keyseal_store::MemoryKeyStore;

    const COLLECTION: &str = "keys";

    fn secret() -> SigningSecret {
        SigningSecret::new("verifier-test-secret").unwrap()
    }

    async fn setup() -> (Arc<MemoryKeyStore>, Issuer, Verifier) {
        let store = Arc::new(MemoryKeyStore::new());
        store.ensure_collection(COLLECTION).await.unwrap();
        let issuer = Issuer::new(store.clone(), COLLECTION, &secret());
        let verifier = Verifier::new(store.clone(), COLLECTION, &secret());
        (store, issuer, verifier)
    }

    #[tokio::test]
    async fn test_issued_token_is_authorized() {
        let (_store, issuer, verifier) = setup().await;
        let credential = issuer.issue().await.unwrap();

        let key = verifier.check(Some(&credential.token)).await.unwrap();
        assert_eq!(key.public_key, credential.public_key);
        assert_eq!(key.fingerprint, fingerprint(&credential.public_key));
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (_store, _issuer, verifier) = setup().await;
        assert!(matches!(
            verifier.check(None).await,
            Err(RejectReason::DecodeFailed(_))
        ));
        assert!(matches!(
            verifier.check(Some("")).await,
            Err(RejectReason::DecodeFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_token_without_public_key_claim() {
        let (_store, _issuer, verifier) = setup().await;
        let claims = IdentityClaims {
            public_key: None,
            iat: Some(0),
        };
        let token = TokenSigner::new(&secret()).sign(&claims).unwrap();

        assert!(matches!(
            verifier.check(Some(&token)).await,
            Err(RejectReason::ClaimMissing)
        ));
    }

    #[tokio::test]
    async fn test_unknown_public_key() {
        let (_store, _issuer, verifier) = setup().await;
        let stranger = RsaKeyPair::generate().unwrap();
        let token = TokenSigner::new(&secret())
            .sign(&IdentityClaims::new(stranger.public_key_pem().unwrap()))
            .unwrap();

        assert!(matches!(
            verifier.check(Some(&token)).await,
            Err(RejectReason::LookupNotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_records_are_ambiguous() {
        let (store, issuer, verifier) = setup().await;
        let credential = issuer.issue().await.unwrap();

        let existing = store
            .find_by_public_key(COLLECTION, &credential.public_key)
            .await
            .unwrap();
        store.insert(COLLECTION, &existing[0]).await.unwrap();

        assert!(matches!(
            verifier.check(Some(&credential.token)).await,
            Err(RejectReason::LookupAmbiguous(2))
        ));
    }

    #[tokio::test]
    async fn test_swapped_private_key_fails_self_check() {
        let (store, issuer, verifier) = setup().await;
        let credential = issuer.issue().await.unwrap();
        let unrelated = RsaKeyPair::generate().unwrap();

        store
            .remove_by_public_key(COLLECTION, &credential.public_key)
            .unwrap();
        store
            .insert(
                COLLECTION,
                &KeyRecord::new(&credential.public_key, unrelated.private_key_pem().unwrap()),
            )
            .await
            .unwrap();

        assert!(matches!(
            verifier.check(Some(&credential.token)).await,
            Err(RejectReason::SelfCheckFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_private_key_fails_self_check() {
        let (store, issuer, verifier) = setup().await;
        let credential = issuer.issue().await.unwrap();

        store
            .remove_by_public_key(COLLECTION, &credential.public_key)
            .unwrap();
        store
            .insert(COLLECTION, &KeyRecord::new(&credential.public_key, "garbage"))
            .await
            .unwrap();

        assert!(matches!(
            verifier.check(Some(&credential.token)).await,
            Err(RejectReason::SelfCheckFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_rejected() {
        let (_store, issuer, _verifier) = setup().await;
        let credential = issuer.issue().await.unwrap();

        // Same secret, but a collection that was never created.
        let verifier = Verifier::new(Arc::new(MemoryKeyStore::new()), COLLECTION, &secret());
        assert!(matches!(
            verifier.check(Some(&credential.token)).await,
            Err(RejectReason::LookupFailed(_))
        ));
        assert_eq!(
            verifier.verify(Some(&credential.token)).await,
            Verification::Rejected
        );
    }

    #[tokio::test]
    async fn test_every_reason_flattens_to_rejected() {
        let (_store, _issuer, verifier) = setup().await;
        assert_eq!(verifier.verify(None).await, Verification::Rejected);
        assert_eq!(verifier.verify(Some("x.y.z")).await, Verification::Rejected);
    }
}
