//! Gateway error types.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ragproxy_providers::ProviderError;
use ragproxy_retrieval::RetrievalError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that can occur in the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Index or query failed.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Direct call to a downstream service failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Listen address could not be parsed.
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

}

impl GatewayError {
    /// The downstream failure, if this error wraps one.
    fn provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Retrieval(e) => Some(e.provider()),
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }

    /// Status code this error is answered with.
    pub fn status(&self) -> StatusCode {
        self.provider()
            .and_then(ProviderError::upstream_status)
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let upstream = self.provider().and_then(|e| match e {
            ProviderError::Upstream { status, body, .. } => {
                StatusCode::from_u16(*status).ok().map(|s| (s, body.clone()))
            }
            _ => None,
        });

        // A downstream answer is relayed as-is.
        if let Some((status, body)) = upstream {
            warn!(status = status.as_u16(), "Relaying downstream failure: {}", self);
            return (status, [(CONTENT_TYPE, content_type_for(&body))], body).into_response();
        }

        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

fn content_type_for(body: &str) -> &'static str {
    if serde_json::from_str::<serde::de::IgnoredAny>(body).is_ok() {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    }
}
