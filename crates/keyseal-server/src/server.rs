//! Server lifecycle.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use keyseal_core::KeysealConfig;
use tokio::net::TcpListener;

/// The keyseal HTTP server.
pub struct KeysealServer {
    state: AppState,
}

impl KeysealServer {
    /// Prepare the store and shared state for the given configuration.
    pub async fn new(config: KeysealConfig) -> Result<Self, ServerError> {
        Ok(Self {
            state: AppState::init(config).await?,
        })
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.state.config.server.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::StartupFailed(format!("bind {addr}: {e}")))?;
        tracing::info!(address = %addr, "keyseal-server listening");

        let app = routes::create_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::StartupFailed(e.to_string()))?;

        tracing::info!("keyseal-server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
