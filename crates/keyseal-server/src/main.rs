use anyhow::Context;
use keyseal_core::KeysealConfig;
use keyseal_server::KeysealServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var("KEYSEAL_CONFIG").unwrap_or_else(|_| "keyseal.yaml".to_string());
    let config = KeysealConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load configuration from {path}"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    KeysealServer::new(config)
        .await
        .context("Failed to initialize keyseal-server")?
        .run()
        .await?;

    Ok(())
}
