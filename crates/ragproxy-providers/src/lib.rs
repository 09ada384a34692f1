//! Inference engine and vector store clients for ragproxy.
//!
//! This crate provides:
//! - [`OllamaClient`]: embeddings, generation, and model-management passthrough
//! - [`ChromaClient`]: collection bootstrap, upsert, and similarity search
//! - [`RagApiClient`]: a remote retrieval service
//!
//! The retrieval pipeline depends only on the [`EmbeddingProvider`],
//! [`GenerationProvider`], and [`VectorStore`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragproxy_providers::{EmbeddingProvider, OllamaClient};
//!
//! let ollama = OllamaClient::new("http://localhost:11434", Duration::from_secs(30))?;
//! let vector = ollama.embed("What is Rust?").await?;
//! ```

mod error;
mod http;

pub mod chroma;
pub mod ollama;
pub mod rag_api;

pub use chroma::ChromaClient;
pub use error::{ProviderError, Result};
pub use ollama::{ModelEndpoint, OllamaClient, RawResponse};
pub use rag_api::RagApiClient;

use async_trait::async_trait;
use ragproxy_core::{DocumentBatch, Metadata};

/// Produces a fixed-length vector for a text input.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Produces a free-text completion for a prompt.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a completion.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A vector database collection.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or overwrite records by id. `embeddings[i]` belongs to record `i`.
    async fn add(&self, batch: &DocumentBatch, embeddings: Vec<Vec<f32>>) -> Result<()>;

    /// Search for the nearest neighbours of each query embedding.
    ///
    /// Returns one group of document texts per query embedding, nearest first.
    async fn query(&self, embeddings: Vec<Vec<f32>>, n_results: i64) -> Result<Vec<Vec<String>>>;
}

/// Metadata list as sent to the vector store for a batch of `expected` records.
///
/// Empty maps become `null` and an all-empty list is omitted. A list whose
/// length does not match the batch is sent unchanged for the store to reject.
pub(crate) fn normalize_metadatas(
    metadatas: Option<&[Metadata]>,
    expected: usize,
) -> Option<Vec<Option<&Metadata>>> {
    let metadatas = metadatas?;
    if metadatas.len() != expected {
        return Some(metadatas.iter().map(Some).collect());
    }
    if metadatas.iter().all(|m| m.is_empty()) {
        return None;
    }
    Some(
        metadatas
            .iter()
            .map(|m| if m.is_empty() { None } else { Some(m) })
            .collect(),
    )
}
