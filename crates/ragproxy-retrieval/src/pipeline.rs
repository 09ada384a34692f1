//! RAG pipeline orchestrator.
//!
//! [`RagPipeline`] composes an [`EmbeddingProvider`], a [`VectorStore`], and
//! a [`GenerationProvider`]:
//!
//! - index: embed every document (in order) → one `add` of the whole batch
//! - query: embed query → search → flatten → prompt → generate
//!
//! # Example
//!
//! ```rust,ignore
//! let pipeline = RagPipeline::from_config(&config)?;
//! pipeline.index(&batch).await?;
//! let response = pipeline.query(&QueryRequest::new("What is Rust?")).await?;
//! ```

use crate::error::RetrievalError;
use crate::prompt::rag_prompt;
use crate::{Result, Retriever};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use ragproxy_core::{
    Config, DocumentBatch, IndexAck, QueryRequest, QueryResponse, GENERATION_FALLBACK,
};
use ragproxy_providers::{
    ChromaClient, EmbeddingProvider, GenerationProvider, OllamaClient, ProviderError, VectorStore,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The retrieval-augmented generation pipeline.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn GenerationProvider>,
    store: Arc<dyn VectorStore>,
    embed_concurrency: usize,
}

impl RagPipeline {
    /// Create a pipeline that embeds one document at a time.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            embedder,
            generator,
            store,
            embed_concurrency: 1,
        }
    }

    /// Build the pipeline against Ollama and Chroma from the runtime configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ProviderError> {
        let ollama = Arc::new(OllamaClient::from_config(config)?);
        let chroma = Arc::new(ChromaClient::from_config(config)?);
        Ok(Self::new(ollama.clone(), ollama, chroma)
            .with_embed_concurrency(config.retrieval.embed_concurrency))
    }

    /// Allow up to `limit` embedding requests in flight while indexing.
    pub fn with_embed_concurrency(mut self, limit: usize) -> Self {
        self.embed_concurrency = limit.max(1);
        self
    }

    /// Embed every document and store the whole batch.
    ///
    /// Nothing is stored unless every embedding succeeds.
    pub async fn index(&self, batch: &DocumentBatch) -> Result<IndexAck> {
        debug!(
            documents = batch.len(),
            concurrency = self.embed_concurrency,
            "Embedding batch"
        );

        // `buffered` keeps output order equal to input order.
        let pending: Vec<_> = batch
            .documents
            .iter()
            .map(|text| self.embedder.embed(text))
            .collect();
        let embeddings: Vec<Vec<f32>> = stream::iter(pending)
            .buffered(self.embed_concurrency)
            .try_collect()
            .await
            .map_err(|e| {
                error!(error = %e, "Embedding failed, batch not stored");
                RetrievalError::Embedding(e)
            })?;

        self.store
            .add(batch, embeddings)
            .await
            .map_err(RetrievalError::VectorStore)?;

        info!(documents = batch.len(), "Indexed batch");
        Ok(IndexAck::default())
    }

    /// Answer a query from the stored documents.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let embedding = self
            .embedder
            .embed(&request.query)
            .await
            .map_err(RetrievalError::Embedding)?;

        let groups = self
            .store
            .query(vec![embedding], request.n_results)
            .await
            .map_err(RetrievalError::VectorStore)?;
        let documents: Vec<String> = groups.into_iter().flatten().collect();

        if documents.is_empty() {
            info!("No documents matched query");
            return Ok(QueryResponse::no_matches());
        }

        let prompt = rag_prompt(&documents, &request.query);
        let answer = match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Generation failed, answering with fallback");
                GENERATION_FALLBACK.to_string()
            }
        };

        info!(documents = documents.len(), "Answered query");
        Ok(QueryResponse { answer, documents })
    }
}

#[async_trait]
impl Retriever for RagPipeline {
    async fn index(&self, batch: &DocumentBatch) -> Result<IndexAck> {
        RagPipeline::index(self, batch).await
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        RagPipeline::query(self, request).await
    }
}
