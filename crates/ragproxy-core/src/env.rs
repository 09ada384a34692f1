//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Interpret a flag value: `1`, `true`, `yes`, and `on` are set.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Load environment variables from a .env file in the working directory.
///
/// Variables that are already set are left untouched.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    let path = std::path::Path::new(".env");
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    for (key, value) in parse_dotenv(&content) {
        if env::var(&key).is_err() {
            env::set_var(key, value);
        }
    }
    Ok(())
}

/// Parse `KEY=value` lines, skipping comments and blank lines.
fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Recognized environment variable names.
pub mod vars {
    /// Vector store base URL.
    pub const CHROMA_DB: &str = "CHROMA_DB";

    /// Retrieval service base URL, used by the proxy.
    pub const RAG_API_URL: &str = "RAG_API_URL";

    /// Inference engine base URL.
    pub const OLLAMA_URL: &str = "OLLAMA_URL";

    /// Embedding model name.
    pub const EMBEDDING_MODEL: &str = "RAGPROXY_EMBEDDING_MODEL";

    /// Generation model name.
    pub const LLM_MODEL: &str = "RAGPROXY_LLM_MODEL";

    /// Vector store collection name.
    pub const COLLECTION: &str = "RAGPROXY_COLLECTION";

    /// Default downstream request timeout, in seconds.
    pub const TIMEOUT_SECS: &str = "RAGPROXY_TIMEOUT_SECS";

    /// Maximum in-flight embedding requests while indexing.
    pub const EMBED_CONCURRENCY: &str = "RAGPROXY_EMBED_CONCURRENCY";

    /// Listen address of the retrieval service.
    pub const RAG_LISTEN: &str = "RAGPROXY_RAG_LISTEN";

    /// Listen address of the proxy.
    pub const PROXY_LISTEN: &str = "RAGPROXY_PROXY_LISTEN";

    /// Log filter directive.
    pub const LOG: &str = "RAGPROXY_LOG";

    /// Emit logs as JSON.
    pub const LOG_JSON: &str = "RAGPROXY_LOG_JSON";

    /// Config file override.
    pub const CONFIG: &str = "RAGPROXY_CONFIG";
}
