//! Ollama inference engine client.
//!
//! Covers the three roles the engine plays for ragproxy:
//! - embeddings (`POST /api/embeddings`)
//! - generation (`POST /api/generate`, non-streaming)
//! - model management, forwarded verbatim (`/api/tags`, `/api/show`, ...)

use crate::http::{build_client, ensure_success, join};
use crate::{EmbeddingProvider, GenerationProvider, ProviderError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "ollama";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Default generation model.
pub const DEFAULT_GENERATION_MODEL: &str = "gemma:2b";

/// Model-management endpoints forwarded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEndpoint {
    /// List local models.
    Tags,
    /// Show model details.
    Show,
    /// Download a model.
    Pull,
    /// Upload a model.
    Push,
    /// Remove a model.
    Delete,
    /// Engine version.
    Version,
}

impl ModelEndpoint {
    /// Path on the engine.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Tags => "/api/tags",
            Self::Show => "/api/show",
            Self::Pull => "/api/pull",
            Self::Push => "/api/push",
            Self::Delete => "/api/delete",
            Self::Version => "/api/version",
        }
    }

    /// HTTP method the engine expects.
    pub fn method(&self) -> Method {
        match self {
            Self::Tags | Self::Version => Method::GET,
            Self::Show | Self::Pull | Self::Push => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }

    /// Downloads and uploads can take arbitrarily long and run without a timeout.
    pub fn is_long_running(&self) -> bool {
        matches!(self, Self::Pull | Self::Push)
    }
}

/// A downstream answer kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: u16,

    /// `content-type` header, if the engine sent one.
    pub content_type: Option<String>,

    /// Response body.
    pub body: Bytes,
}

/// Client for an Ollama server.
pub struct OllamaClient {
    /// Base URL for the Ollama server.
    base_url: String,

    /// Client with the default timeout.
    client: Client,

    /// Client without a timeout, for pull/push.
    unbounded: Client,

    /// Default timeout, for error reporting.
    timeout: Duration,

    /// Embedding model.
    embedding_model: String,

    /// Generation model.
    generation_model: String,
}

impl OllamaClient {
    /// Create a client for the given base URL with a default request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(Some(timeout))?,
            unbounded: build_client(None)?,
            timeout,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
        })
    }

    /// Create a client from the runtime configuration.
    pub fn from_config(config: &ragproxy_core::Config) -> Result<Self> {
        Ok(Self::new(config.services.ollama_url.clone(), config.http.timeout())?
            .with_embedding_model(config.models.embedding.clone())
            .with_generation_model(config.models.generation.clone()))
    }

    /// Set the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the generation model.
    pub fn with_generation_model(mut self, model: impl Into<String>) -> Self {
        self.generation_model = model.into();
        self
    }

    /// Base URL of the engine.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Embedding model in use.
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    /// Generation model in use.
    pub fn generation_model(&self) -> &str {
        &self.generation_model
    }

    /// Forward a model-management request and return the engine's answer
    /// unchanged. Non-success statuses become [`ProviderError::Upstream`].
    pub async fn forward(&self, endpoint: ModelEndpoint, body: Option<Bytes>) -> Result<RawResponse> {
        let url = join(&self.base_url, endpoint.path());
        let (client, timeout) = if endpoint.is_long_running() {
            (&self.unbounded, None)
        } else {
            (&self.client, Some(self.timeout))
        };

        debug!("Forwarding {} {} to Ollama", endpoint.method(), url);

        let mut request = client.request(endpoint.method(), &url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::transport(SERVICE, timeout, e))?;
        let response = ensure_success(SERVICE, response).await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::transport(SERVICE, timeout, e))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }

    async fn post_json<Req, Resp>(&self, path: &str, payload: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = join(&self.base_url, path);
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

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(model = %self.embedding_model, chars = text.len(), "Requesting embedding");

        let response: EmbeddingResponse = self
            .post_json(
                "/api/embeddings",
                &EmbeddingRequest {
                    model: &self.embedding_model,
                    prompt: text,
                },
            )
            .await?;

        if response.embedding.is_empty() {
            return Err(ProviderError::invalid_response(SERVICE, "empty embedding"));
        }
        Ok(response.embedding)
    }
}

#[async_trait]
impl GenerationProvider for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.generation_model, chars = prompt.len(), "Requesting generation");

        let response: GenerateResponse = self
            .post_json(
                "/api/generate",
                &GenerateRequest {
                    model: &self.generation_model,
                    prompt,
                    stream: false,
                },
            )
            .await?;
        Ok(response.response)
    }
}

// API types

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
