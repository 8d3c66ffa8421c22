//! # keyseal-core
//!
//! Configuration and shared data types for keyseal.
//!
//! Every other keyseal crate depends on this one for:
//! - [`KeysealConfig`], loaded from `keyseal.yaml`
//! - [`KeyRecord`], the persisted pairing of a public and private key
//! - [`SigningSecret`], the process-wide HMAC secret for identity tokens

// Configuration types shared across all keyseal crates
pub mod config;
pub mod record;

pub use config::{
    ConfigError, KeysealConfig, ObservabilityConfig, ServerConfig, SigningConfig, SigningSecret,
    StoreBackend, StoreConfig,
};
pub use record::KeyRecord;
