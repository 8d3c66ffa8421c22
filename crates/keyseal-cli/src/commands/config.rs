//! `keyseal config` - Print the effective configuration.

use anyhow::Context;
use keyseal_core::KeysealConfig;

pub fn run(config: &KeysealConfig) -> anyhow::Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

/// YAML rendering of `config`. Inline secrets are never serialized.
pub fn render(config: &KeysealConfig) -> anyhow::Result<String> {
    config.to_yaml().context("Failed to serialize configuration")
}
