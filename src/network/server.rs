//! HTTP Server
//!
//! Binds the listener and serves the router until Ctrl+C.

use std::sync::Arc;

use axum::Router;

use super::handlers;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::transport::Transport;

/// HTTP bridge for slider-osc
pub struct Server<T> {
    config: Config,
    dispatcher: Arc<Dispatcher<T>>,
}

impl<T: Transport + 'static> Server<T> {
    /// Create a new server with the given config and dispatcher
    pub fn new(config: Config, dispatcher: Arc<Dispatcher<T>>) -> Self {
        Self { config, dispatcher }
    }

    pub fn router(&self) -> Router {
        handlers::router(Arc::clone(&self.dispatcher), &self.config.device)
    }

    /// Start the server; returns after a graceful shutdown
    pub async fn run(self) -> Result<()> {
        self.config.validate()?;

        let listener = tokio::net::TcpListener::bind(self.config.http_addr.as_str()).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("HTTP bridge listening on http://{}", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::warn!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
