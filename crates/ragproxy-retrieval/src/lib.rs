//! Retrieval-augmented generation for ragproxy.
//!
//! - [`RagPipeline`]: embeds, stores, searches, and generates in-process
//! - [`RemoteRetriever`]: delegates to a retrieval service over HTTP
//!
//! Both implement [`Retriever`], which is what the HTTP surfaces consume.

mod error;

pub mod pipeline;
pub mod prompt;
pub mod remote;

pub use error::RetrievalError;
pub use pipeline::RagPipeline;
pub use prompt::rag_prompt;
pub use remote::RemoteRetriever;

use async_trait::async_trait;
use ragproxy_core::{DocumentBatch, IndexAck, QueryRequest, QueryResponse};

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Indexes documents and answers queries against them.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Embed and store a batch of documents.
    async fn index(&self, batch: &DocumentBatch) -> Result<IndexAck>;

    /// Retrieve documents for a query and generate an answer from them.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}
