//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default vector store address.
pub const DEFAULT_CHROMA_URL: &str = "http://localhost:8000";

/// Default retrieval service address as seen from the proxy.
pub const DEFAULT_RAG_API_URL: &str = "http://api-rag:8080";

/// Default inference engine address.
pub const DEFAULT_OLLAMA_URL: &str = "http://ollama:11434";

/// Default vector store collection.
pub const DEFAULT_COLLECTION: &str = "rag-collection";

/// Main ragproxy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Downstream service addresses.
    #[serde(default)]
    pub services: ServicesConfig,

    /// Model names.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Retrieval pipeline settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Outbound HTTP settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Listen addresses.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Downstream service base URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Vector store (Chroma) base URL.
    #[serde(default = "default_chroma_url")]
    pub chroma_url: String,

    /// Retrieval service base URL.
    #[serde(default = "default_rag_api_url")]
    pub rag_api_url: String,

    /// Inference engine (Ollama) base URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
}

fn default_chroma_url() -> String {
    DEFAULT_CHROMA_URL.to_string()
}

fn default_rag_api_url() -> String {
    DEFAULT_RAG_API_URL.to_string()
}

fn default_ollama_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            chroma_url: default_chroma_url(),
            rag_api_url: default_rag_api_url(),
            ollama_url: default_ollama_url(),
        }
    }
}

/// Model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model used to embed documents and queries.
    #[serde(default = "default_embedding_model")]
    pub embedding: String,

    /// Model used to generate answers.
    #[serde(default = "default_generation_model")]
    pub generation: String,
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_generation_model() -> String {
    "gemma:2b".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            embedding: default_embedding_model(),
            generation: default_generation_model(),
        }
    }
}

/// Retrieval pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Vector store collection name.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Maximum in-flight embedding requests while indexing a batch.
    /// 1 embeds strictly one document at a time.
    #[serde(default = "default_embed_concurrency")]
    pub embed_concurrency: usize,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_embed_concurrency() -> usize {
    1
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            embed_concurrency: default_embed_concurrency(),
        }
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to every downstream call except model pull/push.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// The default timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Listen addresses for the two HTTP services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Retrieval service listen address.
    #[serde(default = "default_rag_listen")]
    pub rag_listen: String,

    /// Proxy listen address.
    #[serde(default = "default_proxy_listen")]
    pub proxy_listen: String,

    /// Enable permissive CORS on both services.
    #[serde(default = "default_true")]
    pub cors: bool,
}

fn default_rag_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_proxy_listen() -> String {
    "0.0.0.0:5050".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rag_listen: default_rag_listen(),
            proxy_listen: default_proxy_listen(),
            cors: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `ragproxy=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "ragproxy=info,tower_http=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
