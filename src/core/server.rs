//! HTTP Server

use std::net::SocketAddr;

use crate::api;
use crate::core::ServerState;

/// HTTP server wrapping the configured axum application
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let app = api::build_app().with_state(self.state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "QuickBite server listening");

        axum::serve(listener, app).await?;
        Ok(())
    }
}
