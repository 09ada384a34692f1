//! Router construction.

use crate::handlers::{chat, models, rag, ProxyState};
use axum::{
    routing::{get, post},
    Router,
};
use ragproxy_retrieval::Retriever;
use std::sync::Arc;

/// Routes of the retrieval service.
pub fn rag_routes(retriever: Arc<dyn Retriever>) -> Router {
    Router::new()
        .route("/", get(rag::health))
        .route("/index", post(rag::index))
        .route("/embeddings", post(rag::index))
        .route("/query", post(rag::query))
        .with_state(retriever)
}

/// Routes of the Ollama-compatible proxy.
pub fn proxy_routes(state: ProxyState) -> Router {
    Router::new()
        .route("/api/generate", post(chat::generate))
        .route("/api/chat", post(chat::chat))
        .route("/api/embeddings", post(chat::embeddings))
        .route("/api/tags", get(models::tags))
        .route("/api/show", post(models::show))
        .route("/api/pull", post(models::pull))
        .route("/api/push", post(models::push))
        .route("/api/delete", post(models::delete).delete(models::delete))
        .route("/api/version", get(models::version))
        .with_state(state)
}
