//! Identity token creation and decoding.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 under the process-wide
//! [`SigningSecret`]. Only `HS256` is accepted on decode. No time-based
//! claims are enforced.

use crate::claims::IdentityClaims;
use crate::error::CredentialError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use keyseal_core::SigningSecret;

/// Signs identity claims into a token string.
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, claims: &IdentityClaims) -> Result<String, CredentialError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key)
            .map_err(|e| CredentialError::TokenCreationFailed(e.to_string()))
    }
}

/// Checks a token's signature and extracts its claims.
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Identity tokens do not expire.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn decode(&self, token: &str) -> Result<IdentityClaims, CredentialError> {
        decode::<IdentityClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| CredentialError::TokenDecodeFailed(e.to_string()))
    }
}
