//! Chroma vector database client (REST API v1).

use crate::http::{build_client, ensure_success, join};
use crate::{normalize_metadatas, ProviderError, Result, VectorStore};
use async_trait::async_trait;
use bytes::Bytes;
use ragproxy_core::{DocumentBatch, Metadata};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const SERVICE: &str = "chroma";

/// Client bound to a single Chroma collection.
///
/// The collection is resolved with `get_or_create` on first use and its id
/// is cached for the lifetime of the client.
pub struct ChromaClient {
    /// Base URL for the Chroma server.
    base_url: String,

    /// HTTP client.
    client: Client,

    /// Request timeout, for error reporting.
    timeout: Duration,

    /// Collection name.
    collection: String,

    /// Resolved collection id.
    collection_id: OnceCell<String>,
}

impl ChromaClient {
    /// Create a client for `collection` on the server at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        collection: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(Some(timeout))?,
            timeout,
            collection: collection.into(),
            collection_id: OnceCell::new(),
        })
    }

    /// Create a client from the runtime configuration.
    pub fn from_config(config: &ragproxy_core::Config) -> Result<Self> {
        Self::new(
            config.services.chroma_url.clone(),
            config.retrieval.collection.clone(),
            config.http.timeout(),
        )
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Resolve (creating if necessary) the collection id.
    pub async fn collection_id(&self) -> Result<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                let collection: CollectionResponse = self
                    .post_json(
                        "/api/v1/collections",
                        &CreateCollectionRequest {
                            name: &self.collection,
                            get_or_create: true,
                        },
                    )
                    .await?;
                info!(
                    "Using Chroma collection '{}' ({})",
                    self.collection, collection.id
                );
                Ok::<_, ProviderError>(collection.id)
            })
            .await?;
        Ok(id.as_str())
    }

    async fn post_json<Req, Resp>(&self, path: &str, payload: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: for<'de> Deserialize<'de>,
    {
        let bytes = self.post(path, payload).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post<Req>(&self, path: &str, payload: &Req) -> Result<Bytes>
    where
        Req: Serialize + ?Sized,
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
        response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(SERVICE, Some(self.timeout), e))
    }
}

#[async_trait]
impl VectorStore for ChromaClient {
    async fn add(&self, batch: &DocumentBatch, embeddings: Vec<Vec<f32>>) -> Result<()> {
        let id = self.collection_id().await?;
        let request = AddRequest {
            ids: &batch.ids,
            documents: &batch.documents,
            metadatas: normalize_metadatas(batch.metadatas.as_deref(), batch.ids.len()),
            embeddings,
        };

        self.post(&format!("/api/v1/collections/{}/add", id), &request)
            .await?;
        debug!(count = batch.ids.len(), "Added records to '{}'", self.collection);
        Ok(())
    }

    async fn query(&self, embeddings: Vec<Vec<f32>>, n_results: i64) -> Result<Vec<Vec<String>>> {
        let id = self.collection_id().await?;
        let request = QueryRequest {
            query_embeddings: embeddings,
            n_results,
            include: &["documents"],
        };

        let response: QueryResponse = self
            .post_json(&format!("/api/v1/collections/{}/query", id), &request)
            .await?;

        Ok(response
            .documents
            .unwrap_or_default()
            .into_iter()
            .map(|group| group.unwrap_or_default().into_iter().flatten().collect())
            .collect())
    }
}

// API types

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    ids: &'a [String],
    documents: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    metadatas: Option<Vec<Option<&'a Metadata>>>,
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_embeddings: Vec<Vec<f32>>,
    n_results: i64,
    include: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Option<Vec<Option<Vec<Option<String>>>>>,
}
