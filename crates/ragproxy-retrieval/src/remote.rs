//! Retriever backed by a remote retrieval service.

use crate::error::RetrievalError;
use crate::{Result, Retriever};
use async_trait::async_trait;
use ragproxy_core::{Config, DocumentBatch, IndexAck, QueryRequest, QueryResponse};
use ragproxy_providers::{ProviderError, RagApiClient};
use tracing::debug;

/// Forwards index and query calls to another ragproxy retrieval service.
pub struct RemoteRetriever {
    client: RagApiClient,
}

impl RemoteRetriever {
    /// Wrap an existing client.
    pub fn new(client: RagApiClient) -> Self {
        Self { client }
    }

    /// Point at `services.rag_api_url`.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ProviderError> {
        Ok(Self::new(RagApiClient::from_config(config)?))
    }
}

#[async_trait]
impl Retriever for RemoteRetriever {
    async fn index(&self, batch: &DocumentBatch) -> Result<IndexAck> {
        debug!(
            documents = batch.len(),
            "Forwarding index to {}",
            self.client.base_url()
        );
        self.client.index(batch).await.map_err(RetrievalError::Remote)
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        debug!("Forwarding query to {}", self.client.base_url());
        self.client
            .query(request)
            .await
            .map_err(RetrievalError::Remote)
    }
}
