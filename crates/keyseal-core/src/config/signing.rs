//! Identity token signing configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;

/// Configuration for the HMAC secret that signs identity tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Environment variable containing the secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: Option<String>,

    /// Path to a file containing the secret.
    #[serde(default)]
    pub secret_file: Option<PathBuf>,

    /// Inline secret. Prefer `secret_env` or `secret_file` outside development.
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            secret_file: None,
            secret: None,
        }
    }
}

impl SigningConfig {
    /// Resolve the secret from environment, file, or inline value (in that order).
    pub fn resolve_secret(&self) -> Result<SigningSecret, ConfigError> {
        // Try environment variable first
        if let Some(env_var) = &self.secret_env {
            if let Ok(value) = std::env::var(env_var) {
                return SigningSecret::new(value);
            }
        }

        // Try file path
        if let Some(path) = &self.secret_file {
            if path.exists() {
                let value = std::fs::read_to_string(path)?;
                return SigningSecret::new(value.trim());
            }
        }

        match &self.secret {
            Some(value) => SigningSecret::new(value.as_str()),
            None => Err(ConfigError::Config(
                "no signing secret configured (set signing.secret_env, signing.secret_file or signing.secret)"
                    .to_string(),
            )),
        }
    }
}

fn default_secret_env() -> Option<String> {
    Some("KEYSEAL_JWT_SECRET".to_string())
}

/// The process-wide symmetric secret used to sign and verify identity tokens.
///
/// Fixed at start-up and never rotated. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap a secret. Empty secrets are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::Config("signing secret is empty".to_string()));
        }
        Ok(Self(value.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
