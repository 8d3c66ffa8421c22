//! The persisted key record.

use serde::{Deserialize, Serialize};

/// A stored pairing of a PEM public key (SPKI) and PEM private key (PKCS#8).
///
/// Records are written once at issuance and never modified. The public key
/// doubles as the lookup field; it is not guaranteed unique by the store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    pub public_key: String,
    pub private_key: String,
}

impl KeyRecord {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

// Keep private key material out of logs.
impl std::fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRecord")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_document_field_names() {
        let record = KeyRecord::new("PUB", "PRIV");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["publicKey"], "PUB");
        assert_eq!(json["privateKey"], "PRIV");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let record = KeyRecord::new("PUB", "super-secret");
        let printed = format!("{:?}", record);
        assert!(printed.contains("PUB"));
        assert!(!printed.contains("super-secret"));
    }
}
