//! Request handlers.

pub mod chat;
pub mod models;
pub mod rag;

use ragproxy_providers::OllamaClient;
use ragproxy_retrieval::Retriever;
use std::sync::Arc;

/// Shared state for the Ollama-compatible proxy.
#[derive(Clone)]
pub struct ProxyState {
    /// Answers generate/chat and indexes documents.
    pub retriever: Arc<dyn Retriever>,

    /// Inference engine for model-management passthrough.
    pub ollama: Arc<OllamaClient>,
}

impl ProxyState {
    /// Create proxy state.
    pub fn new(retriever: Arc<dyn Retriever>, ollama: Arc<OllamaClient>) -> Self {
        Self { retriever, ollama }
    }
}
