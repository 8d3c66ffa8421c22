//! `keyseal serve` - Run the HTTP server.

use anyhow::Context;
use keyseal_core::KeysealConfig;
use keyseal_server::KeysealServer;

pub async fn run(config: KeysealConfig) -> anyhow::Result<()> {
    KeysealServer::new(config)
        .await
        .context("Failed to initialize keyseal-server")?
        .run()
        .await
        .context("keyseal-server exited with an error")
}
