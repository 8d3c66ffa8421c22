//! Error types for the credentials crate.

use keyseal_store::StoreError;
use thiserror::Error;

/// Errors from key and token primitives.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to generate keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to encode a key as PEM.
    #[error("failed to encode key: {0}")]
    KeyEncodingFailed(String),

    /// Failed to parse private key.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),

    /// Failed to parse public key.
    #[error("failed to parse public key: {0}")]
    InvalidPublicKey(String),

    /// RSA-SHA256 signing failed.
    #[error("failed to sign payload: {0}")]
    SigningFailed(String),

    /// RSA-SHA256 signature did not verify.
    #[error("signature verification failed: {0}")]
    SignatureMismatch(String),

    /// Failed to create token.
    #[error("failed to create token: {0}")]
    TokenCreationFailed(String),

    /// Failed to parse or authenticate token.
    #[error("failed to decode token: {0}")]
    TokenDecodeFailed(String),
}

/// Issuance failure. Reported to callers as an internal error; a token is
/// never produced alongside one of these.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("issuance failed: {0}")]
    Credential(#[from] CredentialError),

    #[error("issuance failed: key record was not persisted: {0}")]
    Persistence(#[from] StoreError),

    #[error("issuance failed: key generation task aborted: {0}")]
    TaskAborted(String),
}

/// Why a presented token was rejected.
///
/// Only ever logged. Every variant maps to the same external outcome,
/// [`crate::Verification::Rejected`].
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("token could not be decoded: {0}")]
    DecodeFailed(String),

    #[error("token carries no public key claim")]
    ClaimMissing,

    #[error("no key record matches the claimed public key")]
    LookupNotFound,

    #[error("{0} key records match the claimed public key")]
    LookupAmbiguous(usize),

    #[error("key record lookup failed: {0}")]
    LookupFailed(#[from] StoreError),

    #[error("stored key pair failed the self-consistency check: {0}")]
    SelfCheckFailed(#[from] CredentialError),
}
