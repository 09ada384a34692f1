//! Model-management passthrough to the inference engine.

use super::ProxyState;
use crate::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use ragproxy_providers::{ModelEndpoint, OllamaClient};

async fn passthrough(
    ollama: &OllamaClient,
    endpoint: ModelEndpoint,
    body: Option<Bytes>,
) -> Result<Response> {
    let raw = ollama
        .forward(endpoint, body.filter(|b| !b.is_empty()))
        .await?;

    let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::OK);
    let mut response = (status, raw.body).into_response();
    match raw.content_type.and_then(|v| HeaderValue::from_str(&v).ok()) {
        Some(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    Ok(response)
}

/// `GET /api/tags`
pub async fn tags(State(state): State<ProxyState>) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Tags, None).await
}

/// `POST /api/show`
pub async fn show(State(state): State<ProxyState>, body: Bytes) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Show, Some(body)).await
}

/// `POST /api/pull`
pub async fn pull(State(state): State<ProxyState>, body: Bytes) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Pull, Some(body)).await
}

/// `POST /api/push`
pub async fn push(State(state): State<ProxyState>, body: Bytes) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Push, Some(body)).await
}

/// `DELETE /api/delete` and `POST /api/delete`; always forwarded as `DELETE`.
pub async fn delete(State(state): State<ProxyState>, body: Bytes) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Delete, Some(body)).await
}

/// `GET /api/version`
pub async fn version(State(state): State<ProxyState>) -> Result<Response> {
    passthrough(&state.ollama, ModelEndpoint::Version, None).await
}
