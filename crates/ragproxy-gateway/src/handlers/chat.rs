//! Ollama-compatible generate and chat, answered through retrieval.

use super::ProxyState;
use crate::Result;
use axum::{extract::State, Json};
use chrono::Utc;
use ragproxy_core::{ChatMessage, DocumentBatch, IndexAck, QueryRequest, DEFAULT_RESULT_COUNT};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `POST /api/generate` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub model: String,
    pub prompt: String,
    /// Accepted for compatibility; answers are never streamed.
    #[serde(default)]
    pub stream: bool,
}

/// `POST /api/generate` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
}

/// `POST /api/chat` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

/// `POST /api/chat` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub created_at: String,
    pub message: ChatMessage,
    pub done: bool,
}

/// Fold a conversation into a single retrieval query.
///
/// The last message is the question; everything before it is rendered as
/// `Role: content` history lines.
pub fn build_chat_prompt(messages: &[ChatMessage]) -> String {
    let (question, history) = match messages.split_last() {
        Some((last, earlier)) => (last.content.as_str(), earlier),
        None => ("", messages),
    };

    let history = history
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nYou are taking part in a chat. Here is the previous history:\n{}\n\nNow, answer the last question:\n{}\n",
        history, question
    )
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// `POST /api/generate`
pub async fn generate(
    State(state): State<ProxyState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if request.stream {
        debug!("Streaming requested; answering in a single response");
    }

    let query = QueryRequest::new(request.prompt).with_results(DEFAULT_RESULT_COUNT);
    let result = state.retriever.query(&query).await?;

    Ok(Json(GenerateResponse {
        model: request.model,
        created_at: timestamp(),
        response: result.answer,
        done: true,
    }))
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<ProxyState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if request.stream {
        debug!("Streaming requested; answering in a single response");
    }
    debug!(messages = request.messages.len(), "Chat request");

    let prompt = build_chat_prompt(&request.messages);
    let query = QueryRequest::new(prompt).with_results(DEFAULT_RESULT_COUNT);
    let result = state.retriever.query(&query).await?;

    Ok(Json(ChatResponse {
        model: request.model,
        created_at: timestamp(),
        message: ChatMessage::assistant(result.answer),
        done: true,
    }))
}

/// `POST /api/embeddings`: index documents through the retriever.
pub async fn embeddings(
    State(state): State<ProxyState>,
    Json(batch): Json<DocumentBatch>,
) -> Result<Json<IndexAck>> {
    debug!(documents = batch.len(), "Embeddings request");
    Ok(Json(state.retriever.index(&batch).await?))
}
