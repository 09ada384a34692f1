//! HTTP surfaces for ragproxy.
//!
//! This crate provides:
//! - The retrieval service: `GET /`, `POST /index`, `POST /embeddings`, `POST /query`
//! - The Ollama-compatible proxy: `/api/generate` and `/api/chat` answered
//!   through retrieval, `/api/embeddings` indexing, and model-management
//!   passthrough to the inference engine
//! - [`Gateway`]: listener, CORS, request tracing, and graceful shutdown

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::GatewayError;
pub use handlers::ProxyState;
pub use routes::{proxy_routes, rag_routes};
pub use server::{shutdown_signal, Gateway, GatewayConfig};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
