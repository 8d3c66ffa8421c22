//! Identity token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims carried by an identity token.
///
/// `public_key` is optional on the wire so that a validly signed token without
/// it is reported as a missing claim rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// SPKI PEM of the bearer's public key.
    #[serde(rename = "publicKey", default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Issued-at, Unix seconds. Informational only; never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl IdentityClaims {
    /// Claims for `public_key`, stamped with the current time.
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            iat: Some(Utc::now().timestamp()),
        }
    }

    /// The public key, if present and non-empty.
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let claims = IdentityClaims::new("PEM");
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["publicKey"], "PEM");
        assert!(json["iat"].is_i64());
    }

    #[test]
    fn test_missing_and_empty_public_key() {
        let claims: IdentityClaims = serde_json::from_str(r#"{"iat": 1}"#).unwrap();
        assert_eq!(claims.public_key(), None);

        let claims: IdentityClaims = serde_json::from_str(r#"{"publicKey": ""}"#).unwrap();
        assert_eq!(claims.public_key(), None);
    }
}
