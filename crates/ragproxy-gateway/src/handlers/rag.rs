//! Retrieval service handlers.

use crate::Result;
use axum::{extract::State, Json};
use ragproxy_core::{DocumentBatch, IndexAck, QueryRequest, QueryResponse};
use ragproxy_retrieval::Retriever;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Health check message.
pub const HEALTH_MESSAGE: &str = "RAG API is running.";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

/// `GET /`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: HEALTH_MESSAGE,
    })
}

/// `POST /index` and `POST /embeddings`
pub async fn index(
    State(retriever): State<Arc<dyn Retriever>>,
    Json(batch): Json<DocumentBatch>,
) -> Result<Json<IndexAck>> {
    debug!(documents = batch.len(), "Index request");
    Ok(Json(retriever.index(&batch).await?))
}

/// `POST /query`
pub async fn query(
    State(retriever): State<Arc<dyn Retriever>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    debug!(n_results = request.n_results, "Query request");
    Ok(Json(retriever.query(&request).await?))
}
