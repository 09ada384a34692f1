//! Client for a remote ragproxy retrieval service.

use crate::http::{build_client, ensure_success, join};
use crate::{ProviderError, Result};
use ragproxy_core::{DocumentBatch, IndexAck, QueryRequest, QueryResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "rag-api";

/// Client for the retrieval service's `/embeddings` and `/query` routes.
pub struct RagApiClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl RagApiClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(Some(timeout))?,
            timeout,
        })
    }

    /// Create a client from the runtime configuration.
    pub fn from_config(config: &ragproxy_core::Config) -> Result<Self> {
        Self::new(config.services.rag_api_url.clone(), config.http.timeout())
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Index a batch of documents.
    pub async fn index(&self, batch: &DocumentBatch) -> Result<IndexAck> {
        self.post_json("/embeddings", batch).await
    }

    /// Run a retrieval query.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.post_json("/query", request).await
    }

    async fn post_json<Req, Resp>(&self, path: &str, payload: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = join(&self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::transport(SERVICE, Some(self.timeout), e))?;
        let response = ensure_success(SERVICE, response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(SERVICE, Some(self.timeout), e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
