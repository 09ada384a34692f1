//! Error types for downstream service clients.

use std::time::Duration;
use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Provider error types.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The downstream service answered with a non-success status.
    #[error("{service} returned {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Network error (connection refused, reset, DNS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Timeout error.
    #[error("Request to {service} timed out after {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The service answered successfully but the payload was unusable.
    #[error("Invalid response from {service}: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Create an upstream status error.
    pub fn upstream(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(service: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service,
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify a transport failure, separating timeouts from other faults.
    pub fn transport(service: &'static str, timeout: Option<Duration>, err: reqwest::Error) -> Self {
        match timeout {
            Some(timeout) if err.is_timeout() => Self::Timeout { service, timeout },
            _ => Self::Network(err),
        }
    }

    /// Downstream status code, when the failure came from a downstream answer.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Downstream response body, when the failure came from a downstream answer.
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            Self::Upstream { body, .. } => Some(body),
            _ => None,
        }
    }
}
