//! # keyseal-credentials
//!
//! Credential issuance and verification.
//!
//! This crate provides functionality for:
//! - Generating 2048-bit RSA keypairs (SPKI / PKCS#8 PEM)
//! - Signing identity tokens that carry a public key (HS256 JWT)
//! - Issuing credentials: generate, persist, sign
//! - Verifying credentials against the stored key record
//!
//! ## Protocol
//!
//! | Step | Issuer | Verifier |
//! |------|--------|----------|
//! | Keys | Generate a fresh RSA pair | Parse the stored private key and the claimed public key |
//! | Store | Insert `{publicKey, privateKey}` and wait for the ack | Require exactly one record for the claimed public key |
//! | Token | Sign `{publicKey, iat}` with the shared secret | Check signature, extract `publicKey` |
//! | Proof | | Sign the public key with the stored private key, verify with the claimed public key |
//!
//! ## Failure policy
//!
//! Issuance errors surface as [`IssueError`]. Verification never surfaces an
//! error: every failure is the single outcome [`Verification::Rejected`], so
//! a caller cannot tell a forged token from an unknown or corrupted key.

pub mod claims;
pub mod error;
pub mod issuer;
pub mod keys;
pub mod token;
pub mod verifier;

pub use claims::IdentityClaims;
pub use error::{CredentialError, IssueError, RejectReason};
pub use issuer::{IssuedCredential, Issuer};
pub use keys::RsaKeyPair;
pub use token::{TokenDecoder, TokenSigner};
pub use verifier::{AuthenticatedKey, Verification, Verifier};
