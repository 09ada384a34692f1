//! Retrieval error types.

use ragproxy_providers::ProviderError;
use thiserror::Error;

/// Errors that can occur while indexing or querying.
///
/// Generation failures are absent on purpose: the query path recovers from
/// them with a fixed answer.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Embedding generation failed.
    #[error("Embedding error: {0}")]
    Embedding(#[source] ProviderError),

    /// Vector store call failed.
    #[error("Vector store error: {0}")]
    VectorStore(#[source] ProviderError),

    /// Remote retrieval service call failed.
    #[error("Retrieval service error: {0}")]
    Remote(#[source] ProviderError),
}

impl RetrievalError {
    /// The underlying downstream failure.
    pub fn provider(&self) -> &ProviderError {
        match self {
            Self::Embedding(e) | Self::VectorStore(e) | Self::Remote(e) => e,
        }
    }

    /// Downstream status code, when a downstream service answered with one.
    pub fn upstream_status(&self) -> Option<u16> {
        self.provider().upstream_status()
    }

    /// Downstream body, when a downstream service answered with one.
    pub fn upstream_body(&self) -> Option<&str> {
        self.provider().upstream_body()
    }
}
