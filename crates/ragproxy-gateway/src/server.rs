//! HTTP server.

use crate::error::GatewayError;
use crate::Result;
use axum::{http::Method, Router};
use ragproxy_core::Config;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Listener configuration for one HTTP surface.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind.
    pub listen: SocketAddr,

    /// Answer cross-origin requests from any origin.
    pub cors: bool,
}

impl GatewayConfig {
    /// Parse a listen address.
    pub fn new(listen: &str, cors: bool) -> Result<Self> {
        let listen = listen
            .parse()
            .map_err(|_| GatewayError::InvalidAddress(listen.to_string()))?;
        Ok(Self { listen, cors })
    }

    /// Listener for the retrieval service.
    pub fn rag(config: &Config) -> Result<Self> {
        Self::new(&config.server.rag_listen, config.server.cors)
    }

    /// Listener for the Ollama-compatible proxy.
    pub fn proxy(config: &Config) -> Result<Self> {
        Self::new(&config.server.proxy_listen, config.server.cors)
    }

    /// Replace the listen address.
    pub fn with_listen(mut self, listen: &str) -> Result<Self> {
        self.listen = Self::new(listen, self.cors)?.listen;
        Ok(self)
    }
}

/// An HTTP surface bound to one address.
pub struct Gateway {
    config: GatewayConfig,
    routes: Router,
}

impl Gateway {
    /// Create a gateway serving `routes`.
    pub fn new(config: GatewayConfig, routes: Router) -> Self {
        Self { config, routes }
    }

    /// Listen address.
    pub fn listen(&self) -> SocketAddr {
        self.config.listen
    }

    /// The routes wrapped in CORS and request tracing.
    pub fn app(&self) -> Router {
        let mut app = self.routes.clone();

        if self.config.cors {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any)
                .allow_origin(Any);
            app = app.layer(cors);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.listen).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("Listening on http://{}", addr);

        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server on {} stopped", addr);
        Ok(())
    }
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
