//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::api::build_app;
use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C, then close the database pool.
    pub async fn run(self) -> std::io::Result<()> {
        let app = build_app(self.state.clone());

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Employees API running on http://{}", listener.local_addr()?);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        self.state.db.close().await;
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Keep serving; the process can still be killed externally
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
